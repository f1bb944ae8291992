use actix_web::{http::header, web, FromRequest};
use futures::future::{ready, LocalBoxFuture};
use thiserror::Error;

use crate::{
  schema::{AbstractUsers, User},
  types, App, Error,
};

use super::Jwt;

/// Whoever sent the request.
///
/// Requests without a session token are anonymous. Requests with
/// an invalid or expired token are rejected right away.
#[derive(Debug)]
pub enum Actor {
  Anonymous,
  User(User),
}

impl Actor {
  pub fn get_user(self) -> Result<User, Error> {
    #[derive(Debug, Error)]
    #[error("Attempt to access user-only route")]
    struct Unauthorized;
    match self {
      Self::User(n) => Ok(n),
      Self::Anonymous => Err(Error::from_context(types::Error::Unauthorized, Unauthorized)),
    }
  }
}

impl FromRequest for Actor {
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(
    req: &actix_web::HttpRequest,
    _payload: &mut actix_web::dev::Payload,
  ) -> Self::Future {
    let token = req
      .headers()
      .get(header::AUTHORIZATION)
      .and_then(|v| v.to_str().ok())
      .and_then(|v| v.strip_prefix("Bearer "));

    let Some(token) = token else {
      return Box::pin(ready(Ok(Actor::Anonymous)));
    };

    let Some(app) = req.app_data::<web::Data<App>>() else {
      #[derive(Debug, Error)]
      #[error("The web app has no available configuration")]
      struct NoConfig;
      return Box::pin(ready(Err(Error::from_context(
        types::Error::Internal,
        NoConfig,
      ))));
    };

    let jwt = match Jwt::decode(token, app) {
      Ok(jwt) => jwt,
      Err(error) => return Box::pin(ready(Err(error))),
    };

    let app = app.clone();
    Box::pin(async move {
      // deleted users keep their tokens until they expire
      match app.db.fetch_user(jwt.user_id).await? {
        Some(user) => Ok(Actor::User(user)),
        None => Ok(Actor::Anonymous),
      }
    })
  }
}
