use agora::{config, telemetry};
use clap::Parser;
use error_stack::{Result, ResultExt};
use thiserror::Error;
use tokio::runtime::Runtime;

mod migrate;
mod server;
mod staff;

/// Command line options for agora.
#[derive(Debug, Parser)]
#[command(about = "Utility suite for agora backend", version, author, long_about)]
pub struct Cli {
  #[clap(subcommand)]
  pub subcommand: Subcommand,
}

#[derive(Debug, Parser)]
pub enum Subcommand {
  Server(self::server::ServerCommand),
  Migrate(self::migrate::MigrateCommand),
  Staff(self::staff::StaffCommand),
}

#[derive(Debug, Error)]
#[error("Failed to run agora")]
pub struct CliError;

impl Cli {
  pub fn run(self) -> Result<(), CliError> {
    let config = config::Server::load().change_context(CliError)?;
    telemetry::init(&config.logging).change_context(CliError)?;

    match self.subcommand {
      Subcommand::Server(args) => self::server::run(args, config),
      Subcommand::Migrate(args) => self::migrate::run(args, config),
      Subcommand::Staff(args) => self::staff::run(args, config),
    }
  }
}

fn runtime(workers: usize) -> Result<Runtime, CliError> {
  tokio::runtime::Builder::new_multi_thread()
    .enable_all()
    .worker_threads(workers.max(1))
    .build()
    .change_context(CliError)
    .attach_printable("could not build tokio runtime")
}
