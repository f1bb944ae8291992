use crate::error::Result;
use crate::types::id::{marker::UserMarker, Id};

use super::{InsertUser, User};

mod postgres;
mod reference;

#[async_trait::async_trait]
pub trait AbstractUsers: Sync + Send {
  /// Insert a new user, failing if the name is already taken
  async fn insert_user(&self, user: InsertUser<'_>) -> Result<User>;

  /// Fetch a user by its id
  async fn fetch_user(&self, id: Id<UserMarker>) -> Result<Option<User>>;

  /// Fetch a user by its name
  async fn fetch_user_by_name(&self, name: &str) -> Result<Option<User>>;

  /// Grant or revoke the staff flag of a user
  async fn set_user_staff(&self, name: &str, is_staff: bool) -> Result<User>;
}
