use error_stack::{Context, Report};
use thiserror::Error as ThisError;
use tracing_error::SpanTrace;

use crate::types;

mod impls;

pub type Result<T> = std::result::Result<T, Error>;

/// An error that can be sent back to the client.
///
/// It pairs the public [error kind](types::Error) with the report
/// that caused it and the span trace where it was created so
/// internal failures can be logged with enough context.
pub struct Error {
  error_type: types::Error,
  report: Report<RequestFailed>,
  trace: SpanTrace,
}

#[derive(Debug, ThisError)]
#[error("Could not process the request")]
pub struct RequestFailed;

impl Error {
  #[must_use]
  pub fn new(error_type: types::Error) -> Self {
    let report = Report::new(RequestFailed).attach_printable(error_type.message().into_owned());
    Self {
      error_type,
      report,
      trace: SpanTrace::capture(),
    }
  }

  #[must_use]
  pub fn from_context(error_type: types::Error, context: impl Context) -> Self {
    Self::from_report(error_type, Report::new(context))
  }

  #[must_use]
  pub fn from_report(error_type: types::Error, report: Report<impl Context>) -> Self {
    Self {
      error_type,
      report: report.change_context(RequestFailed),
      trace: SpanTrace::capture(),
    }
  }

  #[must_use]
  pub fn not_found(resource: &'static str) -> Self {
    Self::new(types::Error::NotFound(resource))
  }

  #[must_use]
  pub fn forbidden(reason: &'static str) -> Self {
    Self::new(types::Error::Forbidden(reason))
  }

  #[must_use]
  pub fn conflict(reason: &'static str) -> Self {
    Self::new(types::Error::Conflict(reason))
  }
}

impl Error {
  #[must_use]
  pub fn as_type(&self) -> &types::Error {
    &self.error_type
  }

  #[must_use]
  pub fn into_type(self) -> types::Error {
    self.error_type
  }

  #[must_use]
  pub fn report(&self) -> &Report<RequestFailed> {
    &self.report
  }

  #[must_use]
  pub fn change_type(mut self, error_type: types::Error) -> Self {
    self.error_type = error_type;
    self
  }

  #[must_use]
  pub fn downcast_ref<F: Context>(&self) -> Option<&F> {
    self.report.downcast_ref::<F>()
  }
}

impl std::fmt::Debug for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Error")
      .field("type", &self.error_type)
      .field("report", &self.report)
      .field("trace", &self.trace)
      .finish()
  }
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: ", &self.error_type)?;
    writeln!(f, "{:?}", self.report)?;
    std::fmt::Display::fmt(&self.trace, f)
  }
}

impl std::error::Error for Error {}
