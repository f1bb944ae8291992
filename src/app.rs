use error_stack::{Result, ResultExt};
use std::sync::Arc;
use thiserror::Error;

use crate::{
  config,
  database::{self, Database},
};

/// Shared state of every request handler.
#[derive(Debug, Clone)]
pub struct App {
  pub config: Arc<config::Server>,
  pub db: Database,
}

#[derive(Debug, Error)]
#[error("Failed to initialize App struct")]
pub struct AppError;

impl App {
  #[tracing::instrument(skip_all)]
  pub async fn new(cfg: config::Server) -> Result<Self, AppError> {
    let db = Database::connect(cfg.db.as_ref())
      .await
      .change_context(AppError)?;

    Ok(Self::with_database(cfg, db))
  }

  #[must_use]
  pub fn with_database(cfg: config::Server, db: Database) -> Self {
    Self {
      config: Arc::new(cfg),
      db,
    }
  }

  /// Applies pending migrations of the database.
  #[tracing::instrument(skip_all)]
  pub async fn migrate(&self) -> Result<(), database::Error> {
    self.db.migrate().await
  }
}
