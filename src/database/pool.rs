use error_stack::{Report, ResultExt};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::{str::FromStr, time::Duration};

use super::{Error, ErrorExt2, Result, Transaction};
use crate::config;

pub type PoolConnection = sqlx::pool::PoolConnection<sqlx::Postgres>;

#[derive(Clone)]
pub struct Pool {
  pool: sqlx::PgPool,
  readonly: bool,
}

impl Pool {
  pub(crate) async fn new(
    global_cfg: &config::Database,
    pool_cfg: &config::DbPoolConfig,
  ) -> Result<Self> {
    let mut pool_opts = PgPoolOptions::new()
      .acquire_timeout(Duration::from_secs(global_cfg.timeout_secs.get()))
      .max_connections(pool_cfg.pool_size.get());

    if let Some(min_idle) = pool_cfg.min_idle {
      pool_opts = pool_opts.min_connections(min_idle.get());
    }

    let mut connect_opts =
      PgConnectOptions::from_str(pool_cfg.url.as_str()).change_context(Error::InvalidUrl)?;

    if global_cfg.enforce_tls {
      connect_opts = connect_opts.ssl_mode(PgSslMode::Prefer);
    }

    let pool = Self {
      pool: pool_opts.connect_lazy_with(connect_opts),
      readonly: pool_cfg.readonly,
    };

    match pool.wait_until_healthy().await {
      Ok(..) => {}
      Err(err) if err.is_unhealthy() => {
        tracing::warn!("database pool is unhealthy, continuing anyway");
      }
      Err(err) => return Err(err),
    }

    Ok(pool)
  }
}

#[cfg(test)]
impl Pool {
  pub(crate) fn from_sqlx(pool: sqlx::PgPool) -> Self {
    Self {
      pool,
      readonly: false,
    }
  }
}

/// A pool is unhealthy only when no connection can be opened, not
/// when its idle connections were reaped.
fn into_pool_error(error: sqlx::Error) -> Report<Error> {
  match &error {
    sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
      Report::new(error).change_context(Error::UnhealthyPool)
    }
    _ => Report::new(Error::Internal(error)),
  }
}

impl std::fmt::Debug for Pool {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.pool.fmt(f)
  }
}

impl Pool {
  #[inline(always)]
  pub fn connections(&self) -> u32 {
    self.pool.size()
  }

  #[inline(always)]
  pub fn is_healthy(&self) -> bool {
    self.connections() > 0
  }

  #[inline(always)]
  pub fn is_readonly(&self) -> bool {
    self.readonly
  }

  #[tracing::instrument(name = "db.transaction", skip(self))]
  pub async fn begin(&self) -> Result<Transaction<'static>> {
    if self.readonly {
      return Err(Report::new(Error::Readonly));
    }
    self.pool.begin().await.map_err(into_pool_error)
  }

  #[tracing::instrument(name = "db.connect", skip(self))]
  pub async fn get(&self) -> Result<PoolConnection> {
    self.pool.acquire().await.map_err(into_pool_error)
  }

  #[tracing::instrument(skip(self))]
  pub async fn wait_until_healthy(&self) -> Result<()> {
    match self.pool.acquire().await {
      Ok(..) => Ok(()),
      Err(e) if !self.is_healthy() => Err(Report::new(e).change_context(Error::UnhealthyPool)),
      Err(err) => Err(Report::new(Error::Internal(err))),
    }
  }

  #[tracing::instrument(name = "db.migrate", skip(self))]
  pub async fn migrate(&self) -> Result<()> {
    sqlx::migrate!("./migrations")
      .run(&self.pool)
      .await
      .change_context(Error::Migration)
  }
}

