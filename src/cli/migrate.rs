use agora::{config::Server as Config, App};
use clap::Parser;
use error_stack::{Result, ResultExt};

use super::CliError;

/// Apply pending database migrations
#[derive(Debug, Parser)]
pub struct MigrateCommand {}

pub fn run(_args: MigrateCommand, config: Config) -> Result<(), CliError> {
  if config.db.is_none() {
    tracing::warn!("no database is configured, there is nothing to migrate");
    return Ok(());
  }

  super::runtime(1)?.block_on(async move {
    let app = App::new(config).await.change_context(CliError)?;
    app.migrate().await.change_context(CliError)?;
    tracing::info!("all migrations are applied");
    Ok(())
  })
}
