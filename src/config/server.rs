use error_stack::{Report, Result, ResultExt};
use serde::Deserialize;
use std::num::NonZeroU64;
use validator::{Validate, ValidationError};

use super::ParseError;
use crate::util::{
  figment::FigmentErrorAttachable, validator::IntoValidatorReport, Sensitive,
};

#[derive(Debug, Deserialize, Validate)]
pub struct Server {
  /// Postgres database configuration. If it is not set, all data
  /// will be stored in memory and lost once the server exits.
  #[validate]
  pub db: Option<super::Database>,
  /// **Environment variables**:
  /// - `AGORA_JWT_SECRET`
  #[validate(custom = "validate_jwt_secret")]
  pub jwt_secret: Sensitive<String>,
  /// How long an issued session token stays valid.
  ///
  /// **Environment variables**:
  /// - `AGORA_TOKEN_TTL_SECS`
  #[serde(default = "Server::default_token_ttl_secs")]
  pub token_ttl_secs: NonZeroU64,
  #[serde(default)]
  pub http: super::Http,
  #[serde(default)]
  pub logging: super::Logging,
}

fn validate_jwt_secret(secret: &str) -> std::result::Result<(), ValidationError> {
  if (12..=1024).contains(&secret.len()) {
    Ok(())
  } else {
    let mut error = ValidationError::new("length");
    error.message = Some("Invalid JWT secret key".into());
    Err(error)
  }
}

impl Server {
  pub fn load() -> Result<Self, ParseError> {
    dotenvy::dotenv().ok();

    let config = Self::figment()
      .extract::<Self>()
      .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

    config
      .validate()
      .into_validator_report()
      .change_context(ParseError)?;

    Ok(config)
  }
}

impl Server {
  const DEFAULT_CONFIG_FILE: &'static str = "agora.toml";
  const DEFAULT_TOKEN_TTL_SECS: u64 = 60 * 60 * 24 * 7;

  const fn default_token_ttl_secs() -> NonZeroU64 {
    match NonZeroU64::new(Self::DEFAULT_TOKEN_TTL_SECS) {
      Some(n) => n,
      None => panic!("DEFAULT_TOKEN_TTL_SECS is accidentally set to 0"),
    }
  }

  /// Creates a default [`Figment`](figment::Figment) object to load
  /// server configuration. This function is there for [`Server::load`]
  /// and testing.
  pub(crate) fn figment() -> figment::Figment {
    use figment::{
      providers::{Env, Format, Toml},
      Figment,
    };

    Figment::new()
      .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
      // One big con about figment (env provider to be specific) especially
      // these fields with underscore in it.
      .merge(Env::prefixed("AGORA_").map(|v| {
        let key = v.as_str().to_ascii_uppercase();
        match key.as_str() {
          "DB_PRIMARY_MIN_IDLE" => "db.primary.min_idle".into(),
          "DB_PRIMARY_POOL_SIZE" => "db.primary.pool_size".into(),

          "DB_REPLICA_MIN_IDLE" => "db.replica.min_idle".into(),
          "DB_REPLICA_POOL_SIZE" => "db.replica.pool_size".into(),

          "DB_ENFORCE_TLS" => "db.enforce_tls".into(),
          "DB_TIMEOUT_SECS" => "db.timeout_secs".into(),

          "JWT_SECRET" => "jwt_secret".into(),
          "TOKEN_TTL_SECS" => "token_ttl_secs".into(),

          _ => key.replace('_', ".").to_lowercase().into(),
        }
      }))
      // Environment variable aliases
      .merge(
        Env::raw()
          .only(&["DATABASE_URL"])
          .map(|_| "db.primary.url".into()),
      )
  }
}
