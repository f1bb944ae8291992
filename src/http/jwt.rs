use chrono::{NaiveDateTime, Utc};
use error_stack::Report;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
  types::{
    self,
    id::{marker::UserMarker, Id},
  },
  App, Error,
};

/// Claims of a session token.
#[derive(Debug, Deserialize, Serialize)]
pub struct Jwt {
  pub created_at: NaiveDateTime,
  pub issuer: String,
  /// Expiration time as a UNIX timestamp in seconds.
  pub exp: u64,
  pub user_id: Id<UserMarker>,
}

const ISSUER: &str = "agora";

#[derive(Debug, Error)]
#[error("Invalid session token")]
struct InvalidToken;

#[derive(Debug, Error)]
#[error("Could not create session token")]
struct EncodeFailed;

impl Jwt {
  #[tracing::instrument(skip_all)]
  pub fn decode(token: &str, app: &App) -> Result<Self, Error> {
    let key = DecodingKey::from_secret(app.config.jwt_secret.as_bytes());
    let validation = Validation::new(Algorithm::HS512);

    let claims = jsonwebtoken::decode::<Self>(token, &key, &validation)
      .map_err(|e| {
        Error::from_report(
          types::Error::Unauthorized,
          Report::new(e).change_context(InvalidToken),
        )
      })?
      .claims;

    if claims.issuer != ISSUER {
      return Err(Error::from_context(types::Error::Unauthorized, InvalidToken));
    }

    Ok(claims)
  }

  #[tracing::instrument(skip(app))]
  pub fn encode(user_id: Id<UserMarker>, app: &App) -> Result<String, Error> {
    let now = Utc::now();
    let claims = Self {
      created_at: now.naive_utc(),
      issuer: ISSUER.into(),
      exp: now.timestamp().unsigned_abs() + app.config.token_ttl_secs.get(),
      user_id,
    };

    let header = Header::new(Algorithm::HS512);
    let key = EncodingKey::from_secret(app.config.jwt_secret.as_bytes());
    jsonwebtoken::encode(&header, &claims, &key).map_err(|e| {
      Error::from_report(
        types::Error::Internal,
        Report::new(e).change_context(EncodeFailed),
      )
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils;

  #[test]
  fn test_roundtrip() {
    let app = test_utils::app();
    let token = Jwt::encode(Id::new(42), &app).unwrap();

    let claims = Jwt::decode(&token, &app).unwrap();
    assert_eq!(claims.user_id, Id::new(42));
    assert_eq!(claims.issuer, ISSUER);
    assert!(claims.exp > Utc::now().timestamp().unsigned_abs());
  }

  #[test]
  fn test_rejects_invalid_tokens() {
    let app = test_utils::app();
    let error = Jwt::decode("not.a.token", &app).unwrap_err();
    assert!(matches!(error.as_type(), types::Error::Unauthorized));

    let expired = Jwt {
      created_at: Utc::now().naive_utc(),
      issuer: ISSUER.into(),
      exp: 1,
      user_id: Id::new(42),
    };
    let key = EncodingKey::from_secret(app.config.jwt_secret.as_bytes());
    let token = jsonwebtoken::encode(&Header::new(Algorithm::HS512), &expired, &key).unwrap();
    assert!(Jwt::decode(&token, &app).is_err());
  }
}
