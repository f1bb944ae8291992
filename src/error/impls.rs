use actix_web::{body::BoxBody, http::StatusCode, HttpResponse};
use error_stack::Report;

use super::Error;
use crate::{
  database::{self, ErrorExt2},
  types::Error as ErrorType,
};

impl actix_web::ResponseError for Error {
  fn status_code(&self) -> StatusCode {
    match self.error_type {
      ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
      ErrorType::ReadonlyMode => StatusCode::SERVICE_UNAVAILABLE,
      ErrorType::InvalidRequest(..) | ErrorType::InvalidFormBody(..) => StatusCode::BAD_REQUEST,
      ErrorType::Unauthorized => StatusCode::UNAUTHORIZED,
      ErrorType::Forbidden(..) => StatusCode::FORBIDDEN,
      ErrorType::NotFound(..) => StatusCode::NOT_FOUND,
      ErrorType::Conflict(..) => StatusCode::CONFLICT,
    }
  }

  fn error_response(&self) -> HttpResponse<BoxBody> {
    if matches!(self.error_type, ErrorType::Internal) {
      tracing::error!(error = ?self, "internal error occurred");
    }
    HttpResponse::build(self.status_code()).json(&self.error_type)
  }
}

impl From<ErrorType> for Error {
  fn from(value: ErrorType) -> Self {
    Error::new(value)
  }
}

impl From<Report<database::Error>> for Error {
  fn from(value: Report<database::Error>) -> Self {
    if value.is_readonly() {
      Error::from_report(ErrorType::ReadonlyMode, value)
    } else {
      Error::from_report(ErrorType::Internal, value)
    }
  }
}

impl From<validator::ValidationErrors> for Error {
  fn from(value: validator::ValidationErrors) -> Self {
    #[derive(Debug, thiserror::Error)]
    #[error("Validation error occurred")]
    struct ValidateError;
    Error::from_context(ErrorType::InvalidFormBody(value), ValidateError)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::ResponseError;

  #[test]
  fn test_status_codes() {
    let cases = [
      (ErrorType::Internal, StatusCode::INTERNAL_SERVER_ERROR),
      (ErrorType::ReadonlyMode, StatusCode::SERVICE_UNAVAILABLE),
      (ErrorType::InvalidRequest("?".into()), StatusCode::BAD_REQUEST),
      (ErrorType::Unauthorized, StatusCode::UNAUTHORIZED),
      (ErrorType::Forbidden("no"), StatusCode::FORBIDDEN),
      (ErrorType::NotFound("Unknown post"), StatusCode::NOT_FOUND),
      (ErrorType::Conflict("again?"), StatusCode::CONFLICT),
    ];

    for (kind, status) in cases {
      assert_eq!(Error::new(kind).status_code(), status);
    }
  }

  #[test]
  fn test_database_errors() {
    let error = Error::from(Report::new(database::Error::Readonly));
    assert!(matches!(error.as_type(), ErrorType::ReadonlyMode));

    let error = Error::from(Report::new(database::Error::UnhealthyPool));
    assert!(matches!(error.as_type(), ErrorType::Internal));
    assert!(error.downcast_ref::<database::Error>().is_some());
  }
}
