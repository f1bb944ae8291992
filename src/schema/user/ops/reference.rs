use chrono::Utc;

use crate::database::ReferenceDb;
use crate::error::{Error, Result};
use crate::schema::{InsertUser, User};
use crate::types::id::{marker::UserMarker, Id};

use super::AbstractUsers;

#[async_trait::async_trait]
impl AbstractUsers for ReferenceDb {
  async fn insert_user(&self, user: InsertUser<'_>) -> Result<User> {
    let mut state = self.lock().await;
    if state.users.values().any(|u| u.name == user.name) {
      return Err(Error::conflict("This username is taken"));
    }

    let user = User {
      id: state.next_id(),
      created_at: Utc::now().naive_utc(),
      name: user.name.to_string(),
      display_name: user.display_name.map(ToString::to_string),
      password_hash: user.password_hash.to_string(),
      is_staff: false,
      updated_at: None,
    };
    state.users.insert(user.id, user.clone());
    Ok(user)
  }

  async fn fetch_user(&self, id: Id<UserMarker>) -> Result<Option<User>> {
    let state = self.lock().await;
    Ok(state.users.get(&id).cloned())
  }

  async fn fetch_user_by_name(&self, name: &str) -> Result<Option<User>> {
    let state = self.lock().await;
    Ok(state.users.values().find(|u| u.name == name).cloned())
  }

  async fn set_user_staff(&self, name: &str, is_staff: bool) -> Result<User> {
    let mut state = self.lock().await;
    let user = state
      .users
      .values_mut()
      .find(|u| u.name == name)
      .ok_or_else(|| Error::not_found("Unknown user"))?;

    user.is_staff = is_staff;
    user.updated_at = Some(Utc::now().naive_utc());
    Ok(user.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Error as ErrorType;

  fn alice() -> InsertUser<'static> {
    InsertUser {
      name: "alice",
      display_name: Some("Alice"),
      password_hash: "salt$hash",
    }
  }

  #[tokio::test]
  async fn should_reject_taken_usernames() {
    let db = ReferenceDb::default();
    db.insert_user(alice()).await.unwrap();

    let error = db.insert_user(alice()).await.unwrap_err();
    assert!(matches!(error.as_type(), ErrorType::Conflict(..)));
  }

  #[tokio::test]
  async fn should_fetch_users() {
    let db = ReferenceDb::default();
    let user = db.insert_user(alice()).await.unwrap();

    assert_eq!(db.fetch_user(user.id).await.unwrap(), Some(user.clone()));
    assert_eq!(db.fetch_user_by_name("alice").await.unwrap(), Some(user));
    assert_eq!(db.fetch_user_by_name("bob").await.unwrap(), None);
  }

  #[tokio::test]
  async fn should_toggle_staff() {
    let db = ReferenceDb::default();
    db.insert_user(alice()).await.unwrap();

    assert!(db.set_user_staff("alice", true).await.unwrap().is_staff);
    assert!(!db.set_user_staff("alice", false).await.unwrap().is_staff);

    let error = db.set_user_staff("bob", true).await.unwrap_err();
    assert!(matches!(error.as_type(), ErrorType::NotFound(..)));
  }
}
