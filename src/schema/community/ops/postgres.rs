use crate::database::{Connection, ErrorExt, PgDb, UniqueViolationExt};
use crate::error::{Error, Result};
use crate::schema::{Community, CommunityModerator, InsertCommunity, User};
use crate::types::id::{
  marker::{CommunityMarker, UserMarker},
  Id,
};

use super::AbstractCommunities;

/// Checks whether the user is part of the moderator team of a
/// community. Content outside of a community has no moderators.
pub(crate) async fn is_moderator(
  conn: &mut Connection,
  community_id: Option<Id<CommunityMarker>>,
  user_id: Id<UserMarker>,
) -> Result<bool> {
  let Some(community_id) = community_id else {
    return Ok(false);
  };

  let exists = sqlx::query_scalar::<_, bool>(
    r#"SELECT EXISTS(
         SELECT 1 FROM "community_moderators"
         WHERE community_id = $1 AND user_id = $2
       )"#,
  )
  .bind(community_id)
  .bind(user_id)
  .fetch_one(conn)
  .await
  .into_db_error()?;

  Ok(exists)
}

pub(crate) async fn fetch_community_by_name(
  conn: &mut Connection,
  name: &str,
) -> Result<Option<Community>> {
  let community = sqlx::query_as::<_, Community>(r#"SELECT * FROM "communities" WHERE name = $1"#)
    .bind(name)
    .fetch_optional(conn)
    .await
    .into_db_error()?;

  Ok(community)
}

#[async_trait::async_trait]
impl AbstractCommunities for PgDb {
  #[tracing::instrument(skip_all, fields(name = community.name))]
  async fn insert_community(
    &self,
    creator: &User,
    community: InsertCommunity<'_>,
  ) -> Result<Community> {
    let mut tx = self.db_write().await?;
    let community = sqlx::query_as::<_, Community>(
      r#"INSERT INTO "communities" (name, title, creator_id)
         VALUES ($1, $2, $3)
         RETURNING *"#,
    )
    .bind(community.name)
    .bind(community.title)
    .bind(creator.id)
    .fetch_one(&mut *tx)
    .await
    .on_unique_violation(|| Error::conflict("This community name is taken"))?;

    sqlx::query(
      r#"INSERT INTO "community_moderators" (community_id, user_id, is_administrator)
         VALUES ($1, $2, true)"#,
    )
    .bind(community.id)
    .bind(creator.id)
    .execute(&mut *tx)
    .await
    .into_db_error()?;

    tx.commit().await.into_db_error()?;
    Ok(community)
  }

  #[tracing::instrument(skip(self))]
  async fn fetch_community_by_name(&self, name: &str) -> Result<Option<Community>> {
    let mut conn = self.db_read().await?;
    fetch_community_by_name(&mut conn, name).await
  }

  #[tracing::instrument(skip(self, actor), fields(actor.id = %actor.id))]
  async fn add_community_moderator(
    &self,
    actor: &User,
    community_name: &str,
    username: &str,
  ) -> Result<CommunityModerator> {
    let mut tx = self.db_write().await?;
    let community = fetch_community_by_name(&mut tx, community_name)
      .await?
      .ok_or_else(|| Error::not_found("Unknown community"))?;

    let is_administrator = sqlx::query_scalar::<_, bool>(
      r#"SELECT EXISTS(
           SELECT 1 FROM "community_moderators"
           WHERE community_id = $1 AND user_id = $2 AND is_administrator
         )"#,
    )
    .bind(community.id)
    .bind(actor.id)
    .fetch_one(&mut *tx)
    .await
    .into_db_error()?;

    if !actor.is_staff && !is_administrator {
      return Err(Error::forbidden(
        "Only administrators can add moderators to this community",
      ));
    }

    let user_id = sqlx::query_scalar::<_, Id<UserMarker>>(r#"SELECT id FROM "users" WHERE name = $1"#)
      .bind(username)
      .fetch_optional(&mut *tx)
      .await
      .into_db_error()?
      .ok_or_else(|| Error::not_found("Unknown user"))?;

    let moderator = sqlx::query_as::<_, CommunityModerator>(
      r#"INSERT INTO "community_moderators" (community_id, user_id, is_administrator)
         VALUES ($1, $2, false)
         RETURNING *"#,
    )
    .bind(community.id)
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await
    .on_unique_violation(|| Error::conflict("This user is already a moderator"))?;

    tx.commit().await.into_db_error()?;
    Ok(moderator)
  }
}
