use serde::ser::SerializeMap;
use std::borrow::Cow;
use thiserror::Error;
use validator::ValidationErrors;

/// Every kind of error a client can receive from the API.
///
/// It serializes into:
/// ```json
/// { "code": "not_found", "message": "Unknown post" }
/// ```
/// with an extra `data` field if the error has one (only
/// [`Error::InvalidFormBody`] does at the moment).
#[derive(Debug, Clone, Error)]
pub enum Error {
  #[error("Internal server error occurred")]
  Internal,
  #[error("Server is currently in read-only mode")]
  ReadonlyMode,
  #[error("{0}")]
  InvalidRequest(String),
  #[error("Invalid form body")]
  InvalidFormBody(ValidationErrors),
  #[error("Authentication required")]
  Unauthorized,
  #[error("{0}")]
  Forbidden(&'static str),
  #[error("{0}")]
  NotFound(&'static str),
  #[error("{0}")]
  Conflict(&'static str),
}

impl Error {
  #[must_use]
  pub const fn code(&self) -> &'static str {
    match self {
      Self::Internal => "internal",
      Self::ReadonlyMode => "readonly_mode",
      Self::InvalidRequest(..) => "invalid_request",
      Self::InvalidFormBody(..) => "invalid_form_body",
      Self::Unauthorized => "unauthorized",
      Self::Forbidden(..) => "forbidden",
      Self::NotFound(..) => "not_found",
      Self::Conflict(..) => "conflict",
    }
  }

  #[must_use]
  pub fn message(&self) -> Cow<'static, str> {
    match self {
      Self::Forbidden(msg) | Self::NotFound(msg) | Self::Conflict(msg) => Cow::Borrowed(msg),
      Self::InvalidRequest(msg) => Cow::Owned(msg.clone()),
      _ => Cow::Owned(self.to_string()),
    }
  }

  /// Builds an [`Error::InvalidFormBody`] error with a single
  /// field failing because of `code`.
  #[must_use]
  pub fn invalid_field(field: &'static str, code: &'static str, message: &'static str) -> Self {
    let mut error = validator::ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));

    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    Self::InvalidFormBody(errors)
  }
}

impl serde::Serialize for Error {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    let len = if matches!(self, Self::InvalidFormBody(..)) {
      3
    } else {
      2
    };

    let mut map = serializer.serialize_map(Some(len))?;
    map.serialize_entry("code", self.code())?;
    map.serialize_entry("message", &self.message())?;
    if let Self::InvalidFormBody(data) = self {
      map.serialize_entry("data", data)?;
    }
    map.end()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_serialization() {
    assert_eq!(
      json!({ "code": "not_found", "message": "Unknown post" }),
      serde_json::to_value(Error::NotFound("Unknown post")).unwrap()
    );
    assert_eq!(
      json!({ "code": "unauthorized", "message": "Authentication required" }),
      serde_json::to_value(Error::Unauthorized).unwrap()
    );
    assert_eq!(
      json!({ "code": "invalid_request", "message": "bad query" }),
      serde_json::to_value(Error::InvalidRequest("bad query".into())).unwrap()
    );
  }

  #[test]
  fn test_invalid_field() {
    let error = Error::invalid_field("category_name", "unknown_category", "Unknown category");
    let value = serde_json::to_value(&error).unwrap();
    assert_eq!(value["code"], "invalid_form_body");
    assert_eq!(
      value["data"]["category_name"][0]["code"],
      json!("unknown_category")
    );
  }
}
