//! Extractor configurations so that malformed paths, queries
//! and JSON bodies are answered with our own error type.
use actix_web::{error::JsonPayloadError, web, HttpRequest};
use thiserror::Error;

use crate::{types, Error};

#[derive(Debug, Error)]
#[error("Could not parse the request")]
struct MalformedRequest;

fn invalid_request(message: String) -> actix_web::Error {
  Error::from_context(types::Error::InvalidRequest(message), MalformedRequest).into()
}

#[must_use]
pub fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|error, _req: &HttpRequest| {
    let message = match &error {
      JsonPayloadError::ContentType => "Expected a JSON body".to_string(),
      other => other.to_string(),
    };
    invalid_request(message)
  })
}

#[must_use]
pub fn path_config() -> web::PathConfig {
  web::PathConfig::default().error_handler(|error, _req| invalid_request(error.to_string()))
}

#[must_use]
pub fn query_config() -> web::QueryConfig {
  web::QueryConfig::default().error_handler(|error, _req| invalid_request(error.to_string()))
}
