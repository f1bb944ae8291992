use uuid::Uuid;

use crate::database::{Connection, ErrorExt, PgDb};
use crate::error::{Error, Result};
use crate::schema::community::{fetch_community_by_name, is_moderator};
use crate::schema::{rules, InsertPost, Post, User};
use crate::types::id::{marker::PostMarker, Id};

use super::AbstractPosts;

/// Fetches a post and locks its row until the transaction ends.
pub(crate) async fn fetch_post(conn: &mut Connection, id: Id<PostMarker>) -> Result<Post> {
  sqlx::query_as::<_, Post>(r#"SELECT * FROM "posts" WHERE id = $1 FOR UPDATE"#)
    .bind(id)
    .fetch_optional(conn)
    .await
    .into_db_error()?
    .ok_or_else(|| Error::not_found("Unknown post"))
}

/// Same as [`fetch_post`] but looks the post up by its uuid.
pub(crate) async fn fetch_post_by_uuid(conn: &mut Connection, uuid: Uuid) -> Result<Post> {
  sqlx::query_as::<_, Post>(r#"SELECT * FROM "posts" WHERE uuid = $1 FOR UPDATE"#)
    .bind(uuid)
    .fetch_optional(conn)
    .await
    .into_db_error()?
    .ok_or_else(|| Error::not_found("Unknown post"))
}

#[async_trait::async_trait]
impl AbstractPosts for PgDb {
  #[tracing::instrument(skip_all, fields(creator.id = %creator.id))]
  async fn insert_post(&self, creator: &User, post: InsertPost<'_>) -> Result<Post> {
    let mut tx = self.db_write().await?;
    let community_id = match post.community_name {
      Some(name) => {
        let community = fetch_community_by_name(&mut tx, name)
          .await?
          .ok_or_else(|| Error::not_found("Unknown community"))?;
        Some(community.id)
      }
      None => None,
    };

    let post = sqlx::query_as::<_, Post>(
      r#"INSERT INTO "posts" (uuid, creator_id, community_id, text, comments_enabled)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *"#,
    )
    .bind(Uuid::new_v4())
    .bind(creator.id)
    .bind(community_id)
    .bind(post.text)
    .bind(post.comments_enabled)
    .fetch_one(&mut *tx)
    .await
    .into_db_error()?;

    tx.commit().await.into_db_error()?;
    Ok(post)
  }

  #[tracing::instrument(skip(self))]
  async fn fetch_post_by_uuid(&self, uuid: Uuid) -> Result<Option<Post>> {
    let mut conn = self.db_read().await?;
    let post = sqlx::query_as::<_, Post>(r#"SELECT * FROM "posts" WHERE uuid = $1"#)
      .bind(uuid)
      .fetch_optional(&mut *conn)
      .await
      .into_db_error()?;

    Ok(post)
  }

  #[tracing::instrument(skip(self))]
  async fn fetch_post_id_by_uuid(&self, uuid: Uuid) -> Result<Id<PostMarker>> {
    // handlers write right after resolving it so replica lag must not apply
    let mut conn = self.db_read_prefer_primary().await?;
    sqlx::query_scalar::<_, Id<PostMarker>>(r#"SELECT id FROM "posts" WHERE uuid = $1"#)
      .bind(uuid)
      .fetch_optional(&mut *conn)
      .await
      .into_db_error()?
      .ok_or_else(|| Error::not_found("Unknown post"))
  }

  #[tracing::instrument(skip(self, actor), fields(actor.id = %actor.id))]
  async fn delete_post(&self, actor: &User, uuid: Uuid) -> Result<()> {
    let mut tx = self.db_write().await?;
    let post = fetch_post_by_uuid(&mut tx, uuid).await?;
    let is_moderator = is_moderator(&mut tx, post.community_id, actor.id).await?;
    rules::ensure_can_delete_post(actor, &post, is_moderator)?;

    // comments and reports are deleted by their foreign keys
    sqlx::query(r#"DELETE FROM "posts" WHERE id = $1"#)
      .bind(post.id)
      .execute(&mut *tx)
      .await
      .into_db_error()?;

    tx.commit().await.into_db_error()?;
    Ok(())
  }
}
