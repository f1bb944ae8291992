use crate::{
  types::id::{marker::UserMarker, Id},
  types::validation::{not_blank, USERNAME_MAX},
  util::Sensitive,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct Request {
  #[validate(length(min = 1, max = "USERNAME_MAX"))]
  pub username: String,
  #[validate(custom = "not_blank")]
  pub password: Sensitive<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Response {
  pub id: Id<UserMarker>,
  pub token: Sensitive<String>,
}
