use crate::database::{ErrorExt, PgDb, UniqueViolationExt};
use crate::error::{Error, Result};
use crate::schema::{InsertUser, User};
use crate::types::id::{marker::UserMarker, Id};

use super::AbstractUsers;

#[async_trait::async_trait]
impl AbstractUsers for PgDb {
  #[tracing::instrument(skip_all, fields(name = user.name))]
  async fn insert_user(&self, user: InsertUser<'_>) -> Result<User> {
    let mut tx = self.db_write().await?;
    let user = sqlx::query_as::<_, User>(
      r#"INSERT INTO "users" (name, display_name, password_hash)
         VALUES ($1, $2, $3)
         RETURNING *"#,
    )
    .bind(user.name)
    .bind(user.display_name)
    .bind(user.password_hash)
    .fetch_one(&mut *tx)
    .await
    .on_unique_violation(|| Error::conflict("This username is taken"))?;

    tx.commit().await.into_db_error()?;
    Ok(user)
  }

  #[tracing::instrument(skip(self))]
  async fn fetch_user(&self, id: Id<UserMarker>) -> Result<Option<User>> {
    let mut conn = self.db_read_prefer_primary().await?;
    let user = sqlx::query_as::<_, User>(r#"SELECT * FROM "users" WHERE id = $1"#)
      .bind(id)
      .fetch_optional(&mut *conn)
      .await
      .into_db_error()?;

    Ok(user)
  }

  #[tracing::instrument(skip(self))]
  async fn fetch_user_by_name(&self, name: &str) -> Result<Option<User>> {
    let mut conn = self.db_read_prefer_primary().await?;
    let user = sqlx::query_as::<_, User>(r#"SELECT * FROM "users" WHERE name = $1"#)
      .bind(name)
      .fetch_optional(&mut *conn)
      .await
      .into_db_error()?;

    Ok(user)
  }

  #[tracing::instrument(skip(self))]
  async fn set_user_staff(&self, name: &str, is_staff: bool) -> Result<User> {
    let mut tx = self.db_write().await?;
    let user = sqlx::query_as::<_, User>(
      r#"UPDATE "users" SET is_staff = $2, updated_at = (now() AT TIME ZONE 'utc')
         WHERE name = $1
         RETURNING *"#,
    )
    .bind(name)
    .bind(is_staff)
    .fetch_optional(&mut *tx)
    .await
    .into_db_error()?
    .ok_or_else(|| Error::not_found("Unknown user"))?;

    tx.commit().await.into_db_error()?;
    Ok(user)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils;
  use crate::types::Error as ErrorType;
  use sqlx::PgPool;

  #[sqlx::test(migrations = "./migrations")]
  #[ignore = "needs a Postgres server at DATABASE_URL"]
  async fn should_map_taken_usernames_to_conflicts(pool: PgPool) {
    let db = PgDb::from_pool(pool);
    let alice = test_utils::user(&db, "alice").await;

    let user = InsertUser {
      name: "alice",
      display_name: None,
      password_hash: "x",
    };
    let error = db.insert_user(user).await.unwrap_err();
    assert!(matches!(
      error.as_type(),
      ErrorType::Conflict("This username is taken")
    ));

    let staff = db.set_user_staff("alice", true).await.unwrap();
    assert!(staff.is_staff);
    assert_eq!(db.fetch_user(alice.id).await.unwrap(), Some(staff));

    let error = db.set_user_staff("nobody", true).await.unwrap_err();
    assert!(matches!(error.as_type(), ErrorType::NotFound("Unknown user")));
  }
}
