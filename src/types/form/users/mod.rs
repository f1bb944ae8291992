use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::schema::User;
use crate::types::id::{marker::UserMarker, Id};

pub mod login;
pub mod register;

/// Public information of a user.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Profile {
  pub id: Id<UserMarker>,
  pub created_at: NaiveDateTime,
  pub name: String,
  pub display_name: Option<String>,
  pub is_staff: bool,
}

impl From<User> for Profile {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      created_at: user.created_at,
      name: user.name,
      display_name: user.display_name,
      is_staff: user.is_staff,
    }
  }
}
