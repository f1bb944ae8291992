use error_stack::ResultExt;
use thiserror::Error as ThisError;

use crate::config;

mod error;
mod pool;
mod postgres;
mod reference;

pub use error::*;
pub use pool::{Pool, PoolConnection};
pub use postgres::PgDb;
pub use reference::{ReferenceDb, ReferenceState};

pub type Transaction<'a> = sqlx::Transaction<'a, sqlx::Postgres>;
pub type Connection = sqlx::PgConnection;

/// Storage backend of the application.
///
/// It dereferences to [`AbstractDatabase`](crate::schema::AbstractDatabase)
/// so every domain operation can be called directly on it.
#[derive(Debug, Clone)]
pub enum Database {
  /// In-memory database. Used when there is no configured Postgres
  /// database and in tests.
  Reference(ReferenceDb),
  /// Postgres database
  Postgres(PgDb),
}

#[derive(Debug, ThisError)]
#[error("Failed to connect to the database")]
pub struct ConnectError;

impl Database {
  #[tracing::instrument(skip_all)]
  pub async fn connect(cfg: Option<&config::Database>) -> error_stack::Result<Self, ConnectError> {
    if let Some(cfg) = cfg {
      let db = PgDb::new(cfg).await.change_context(ConnectError)?;
      Ok(Self::Postgres(db))
    } else {
      tracing::warn!("no database is configured, all data will be stored in memory");
      Ok(Self::Reference(ReferenceDb::default()))
    }
  }

  /// Applies all pending migrations. It does nothing
  /// for the in-memory database.
  pub async fn migrate(&self) -> Result<()> {
    match self {
      Self::Reference(..) => Ok(()),
      Self::Postgres(pg) => pg.migrate().await,
    }
  }
}
