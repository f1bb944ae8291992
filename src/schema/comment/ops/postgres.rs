use std::num::NonZeroU32;

use crate::database::{Connection, ErrorExt, PgDb};
use crate::error::{Error, Result};
use crate::schema::community::is_moderator;
use crate::schema::post::fetch_post;
use crate::schema::{rules, PostComment, User};
use crate::types::id::{
  marker::{CommentMarker, PostMarker},
  Id,
};

use super::AbstractComments;

/// Fetches a comment of a post and locks its row until the
/// transaction ends. Comments of other posts are not found.
pub(crate) async fn fetch_comment(
  conn: &mut Connection,
  post_id: Id<PostMarker>,
  comment_id: Id<CommentMarker>,
) -> Result<PostComment> {
  sqlx::query_as::<_, PostComment>(
    r#"SELECT * FROM "post_comments"
       WHERE id = $1 AND post_id = $2
       FOR UPDATE"#,
  )
  .bind(comment_id)
  .bind(post_id)
  .fetch_optional(conn)
  .await
  .into_db_error()?
  .ok_or_else(|| Error::not_found("Unknown comment"))
}

#[async_trait::async_trait]
impl AbstractComments for PgDb {
  #[tracing::instrument(skip(self))]
  async fn fetch_comments_for_post(
    &self,
    post_id: Id<PostMarker>,
    max_id: Option<Id<CommentMarker>>,
    limit: NonZeroU32,
  ) -> Result<Vec<PostComment>> {
    let mut conn = self.db_read().await?;
    let exists = sqlx::query_scalar::<_, bool>(
      r#"SELECT EXISTS(SELECT 1 FROM "posts" WHERE id = $1)"#,
    )
    .bind(post_id)
    .fetch_one(&mut *conn)
    .await
    .into_db_error()?;

    if !exists {
      return Err(Error::not_found("Unknown post"));
    }

    let comments = sqlx::query_as::<_, PostComment>(
      r#"SELECT * FROM "post_comments"
         WHERE post_id = $1 AND ($2::BIGINT IS NULL OR id < $2)
         ORDER BY id DESC
         LIMIT $3"#,
    )
    .bind(post_id)
    .bind(max_id)
    .bind(i64::from(limit.get()))
    .fetch_all(&mut *conn)
    .await
    .into_db_error()?;

    Ok(comments)
  }

  #[tracing::instrument(skip(self, actor, text), fields(actor.id = %actor.id))]
  async fn comment_post(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    text: &str,
  ) -> Result<PostComment> {
    let mut tx = self.db_write().await?;
    let post = fetch_post(&mut tx, post_id).await?;
    let is_moderator = is_moderator(&mut tx, post.community_id, actor.id).await?;
    rules::ensure_can_comment(actor, &post, is_moderator)?;

    let comment = sqlx::query_as::<_, PostComment>(
      r#"INSERT INTO "post_comments" (post_id, commenter_id, text)
         VALUES ($1, $2, $3)
         RETURNING *"#,
    )
    .bind(post.id)
    .bind(actor.id)
    .bind(text)
    .fetch_one(&mut *tx)
    .await
    .into_db_error()?;

    tx.commit().await.into_db_error()?;
    Ok(comment)
  }

  #[tracing::instrument(skip(self, actor), fields(actor.id = %actor.id))]
  async fn delete_comment_for_post(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    comment_id: Id<CommentMarker>,
  ) -> Result<()> {
    let mut tx = self.db_write().await?;
    let post = fetch_post(&mut tx, post_id).await?;
    let comment = fetch_comment(&mut tx, post_id, comment_id).await?;
    let is_moderator = is_moderator(&mut tx, post.community_id, actor.id).await?;
    rules::ensure_can_delete_comment(actor, &post, &comment, is_moderator)?;

    sqlx::query(r#"DELETE FROM "post_comments" WHERE id = $1"#)
      .bind(comment.id)
      .execute(&mut *tx)
      .await
      .into_db_error()?;

    tx.commit().await.into_db_error()?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils;
  use sqlx::PgPool;
  use uuid::Uuid;

  fn limit(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
  }

  #[sqlx::test(migrations = "./migrations")]
  #[ignore = "needs a Postgres server at DATABASE_URL"]
  async fn should_page_comments_from_newest(pool: PgPool) {
    let db = PgDb::from_pool(pool);
    let alice = test_utils::user(&db, "alice").await;
    let post = test_utils::post(&db, &alice, None).await;
    let other = test_utils::post(&db, &alice, None).await;
    db.comment_post(&alice, other.id, "elsewhere").await.unwrap();

    let mut ids = Vec::new();
    for i in 0..5 {
      let comment = db.comment_post(&alice, post.id, &format!("#{i}")).await.unwrap();
      ids.push(comment.id);
    }

    let page = db.fetch_comments_for_post(post.id, None, limit(2)).await.unwrap();
    assert_eq!(page.iter().map(|c| c.id).collect::<Vec<_>>(), vec![ids[4], ids[3]]);

    let page = db
      .fetch_comments_for_post(post.id, Some(ids[3]), limit(10))
      .await
      .unwrap();
    assert_eq!(
      page.iter().map(|c| c.id).collect::<Vec<_>>(),
      vec![ids[2], ids[1], ids[0]]
    );

    let error = db
      .fetch_comments_for_post(Id::new(9999), None, limit(10))
      .await
      .unwrap_err();
    assert!(matches!(
      error.as_type(),
      crate::types::Error::NotFound("Unknown post")
    ));
  }

  #[sqlx::test(migrations = false)]
  #[ignore = "needs a Postgres server at DATABASE_URL"]
  async fn should_backfill_post_of_existing_comments(pool: PgPool) {
    let mut early = sqlx::migrate!("./migrations");
    early.migrations = early.migrations[..2].to_vec().into();
    early.run(&pool).await.unwrap();

    sqlx::query(r#"INSERT INTO "users" (name, password_hash) VALUES ('alice', 'x')"#)
      .execute(&pool)
      .await
      .unwrap();
    sqlx::query(r#"INSERT INTO "posts" (uuid, creator_id, text) VALUES ($1, 1, 'Hello')"#)
      .bind(Uuid::new_v4())
      .execute(&pool)
      .await
      .unwrap();
    sqlx::query(r#"INSERT INTO "post_comments" (commenter_id, text) VALUES (1, 'Hi!')"#)
      .execute(&pool)
      .await
      .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    let db = PgDb::from_pool(pool);
    let comments = db
      .fetch_comments_for_post(Id::new(1), None, limit(10))
      .await
      .unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].post_id, Id::new(1));
    assert_eq!(comments[0].text, "Hi!");
  }
}
