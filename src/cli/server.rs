use agora::{config::Server as Config, http, App};
use clap::Parser;
use error_stack::{Result, ResultExt};
use std::net::IpAddr;
use std::num::NonZeroUsize;

use super::CliError;

/// Expose the agora API HTTP server
#[derive(Debug, Parser)]
pub struct ServerCommand {
  #[clap(long)]
  pub address: Option<IpAddr>,
  #[clap(long)]
  pub port: Option<u16>,
  #[clap(long)]
  pub workers: Option<NonZeroUsize>,
}

pub fn run(args: ServerCommand, mut config: Config) -> Result<(), CliError> {
  args.override_config(&mut config);

  super::runtime(config.http.workers)?.block_on(async move {
    let app = App::new(config).await.change_context(CliError)?;
    app.migrate().await.change_context(CliError)?;
    http::serve(app).await.change_context(CliError)
  })
}

impl ServerCommand {
  fn override_config(&self, config: &mut Config) {
    // override server configurations if set by the cli
    if let Some(address) = self.address {
      config.http.ip = address;
    }

    if let Some(port) = self.port {
      config.http.port = port;
    }

    if let Some(workers) = self.workers {
      config.http.workers = workers.get();
    }
  }
}
