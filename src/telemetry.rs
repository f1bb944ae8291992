use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing_subscriber::{
  layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::{Logging, LoggingStyle};

#[derive(Debug, Error)]
#[error("Failed to initialize logging")]
pub struct InitError;

/// Installs the global tracing subscriber.
///
/// Span traces are captured by [`tracing_error::ErrorLayer`] so that
/// [`crate::Error`] can print where an error happened.
pub fn init(cfg: &Logging) -> Result<(), InitError> {
  let filter = EnvFilter::try_new(&cfg.level)
    .change_context(InitError)
    .attach_printable_lazy(|| format!("invalid logging level directive {:?}", cfg.level))?;

  let fmt = tracing_subscriber::fmt::layer();
  let fmt = match cfg.style {
    LoggingStyle::Compact => fmt.compact().boxed(),
    LoggingStyle::Full => fmt.boxed(),
    LoggingStyle::Pretty => fmt.pretty().boxed(),
    LoggingStyle::JSON => fmt.json().boxed(),
  };

  Registry::default()
    .with(fmt.with_filter(filter))
    .with(tracing_error::ErrorLayer::default())
    .try_init()
    .change_context(InitError)
}
