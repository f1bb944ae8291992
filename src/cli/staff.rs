use agora::{config::Server as Config, schema::AbstractUsers, App};
use clap::Parser;
use error_stack::{Report, Result, ResultExt};

use super::CliError;

/// Grant or revoke the staff flag of a user
#[derive(Debug, Parser)]
pub struct StaffCommand {
  /// Name of the user
  pub name: String,
  /// Revoke the staff flag instead of granting it
  #[clap(long)]
  pub revoke: bool,
}

pub fn run(args: StaffCommand, config: Config) -> Result<(), CliError> {
  if config.db.is_none() {
    return Err(Report::new(CliError).attach_printable("no database is configured"));
  }

  super::runtime(1)?.block_on(async move {
    let app = App::new(config).await.change_context(CliError)?;
    let user = app
      .db
      .set_user_staff(&args.name, !args.revoke)
      .await
      .map_err(|e| Report::new(e).change_context(CliError))?;

    tracing::info!(user.id = %user.id, is_staff = user.is_staff, "updated {:?}", user.name);
    Ok(())
  })
}
