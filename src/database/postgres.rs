use error_stack::ResultExt;

use super::{ErrorExt2, Pool, PoolConnection, Result, Transaction};
use crate::config;

/// Postgres driver with an optional read-only replica.
#[derive(Debug, Clone)]
pub struct PgDb {
  primary: Pool,
  replica: Option<Pool>,
}

impl PgDb {
  #[tracing::instrument(skip_all)]
  pub async fn new(cfg: &config::Database) -> Result<Self> {
    let primary = Pool::new(cfg, &cfg.primary)
      .await
      .attach_printable("could not build primary pool")?;

    let replica = if let Some(replica) = cfg.replica.as_ref() {
      let pool = Pool::new(cfg, replica)
        .await
        .attach_printable("could not build replica pool")?;

      Some(pool)
    } else {
      None
    };

    Ok(Self { primary, replica })
  }

  pub async fn migrate(&self) -> Result<()> {
    self.primary.migrate().await
  }

  #[cfg(test)]
  pub(crate) fn from_pool(pool: sqlx::PgPool) -> Self {
    Self {
      primary: Pool::from_sqlx(pool),
      replica: None,
    }
  }
}

impl PgDb {
  /// Starts a transaction from the primary database. Dropping it
  /// without committing rolls everything back.
  #[tracing::instrument(skip_all)]
  pub async fn db_write(&self) -> Result<Transaction<'static>> {
    self.primary.begin().await
  }

  #[tracing::instrument(skip_all)]
  pub async fn db_read(&self) -> Result<PoolConnection> {
    if let Some(replica) = self.replica.as_ref() {
      match replica.get().await {
        Ok(conn) => return Ok(conn),
        // fallback
        Err(err) if err.is_unhealthy() => {}
        Err(err) => return Err(err),
      }
    }
    self.primary.get().await
  }

  #[tracing::instrument(skip_all)]
  pub async fn db_read_prefer_primary(&self) -> Result<PoolConnection> {
    match (self.primary.get().await, self.replica.as_ref()) {
      (Ok(conn), ..) => Ok(conn),
      (Err(e), Some(readonly_replica)) if e.is_unhealthy() => readonly_replica.get().await,
      (Err(e), ..) => Err(e),
    }
  }
}
