use chrono::NaiveDateTime;
use sqlx::FromRow;

use crate::types::id::{marker::UserMarker, Id};

mod ops;
pub use ops::AbstractUsers;

#[derive(Clone, FromRow, PartialEq, Eq)]
pub struct User {
  pub id: Id<UserMarker>,
  pub created_at: NaiveDateTime,
  pub name: String,
  pub display_name: Option<String>,
  pub password_hash: String,
  /// Staff members can moderate everything in the instance.
  pub is_staff: bool,
  pub updated_at: Option<NaiveDateTime>,
}

impl std::fmt::Debug for User {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("User")
      .field("id", &self.id)
      .field("created_at", &self.created_at)
      .field("name", &self.name)
      .field("display_name", &self.display_name)
      .field("password_hash", &"<redacted>")
      .field("is_staff", &self.is_staff)
      .field("updated_at", &self.updated_at)
      .finish()
  }
}

#[derive(Debug, Clone, Copy)]
pub struct InsertUser<'a> {
  pub name: &'a str,
  pub display_name: Option<&'a str>,
  pub password_hash: &'a str,
}
