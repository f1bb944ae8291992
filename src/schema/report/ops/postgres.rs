use crate::database::{Connection, ErrorExt, PgDb, UniqueViolationExt};
use crate::error::{Error, Result};
use crate::schema::comment::fetch_comment;
use crate::schema::community::{fetch_community_by_name, is_moderator};
use crate::schema::post::fetch_post;
use crate::schema::{
  rules, Post, PostComment, PostCommentReport, PostReport, ReportCategory, ReportStatus,
  Resolution, User,
};
use crate::types::id::{
  marker::{
    CategoryMarker, CommentMarker, CommunityMarker, CommentReportMarker, PostMarker, PostReportMarker,
  },
  Id,
};

use super::AbstractReports;

const SELECT_POST_REPORTS: &str = r#"
  SELECT r.*, c.name AS category_name
  FROM "post_reports" r
  JOIN "report_categories" c ON c.id = r.category_id"#;

const SELECT_COMMENT_REPORTS: &str = r#"
  SELECT r.*, c.name AS category_name
  FROM "post_comment_reports" r
  JOIN "report_categories" c ON c.id = r.category_id"#;

async fn fetch_category_id(conn: &mut Connection, name: &str) -> Result<Id<CategoryMarker>> {
  sqlx::query_scalar::<_, Id<CategoryMarker>>(r#"SELECT id FROM "report_categories" WHERE name = $1"#)
    .bind(name)
    .fetch_optional(conn)
    .await
    .into_db_error()?
    .ok_or_else(rules::unknown_category)
}

/// Loads a post and checks whether `actor` can moderate it.
async fn fetch_moderated_post(
  conn: &mut Connection,
  actor: &User,
  post_id: Id<PostMarker>,
) -> Result<Post> {
  let post = fetch_post(conn, post_id).await?;
  let is_moderator = is_moderator(conn, post.community_id, actor.id).await?;
  rules::ensure_can_moderate(actor, is_moderator)?;
  Ok(post)
}

/// Loads a community and checks whether `actor` can moderate it.
async fn fetch_moderated_community_id(
  conn: &mut Connection,
  actor: &User,
  name: &str,
) -> Result<Id<CommunityMarker>> {
  let community = fetch_community_by_name(conn, name)
    .await?
    .ok_or_else(|| Error::not_found("Unknown community"))?;

  let is_moderator = is_moderator(conn, Some(community.id), actor.id).await?;
  rules::ensure_can_moderate(actor, is_moderator)?;
  Ok(community.id)
}

#[async_trait::async_trait]
impl AbstractReports for PgDb {
  #[tracing::instrument(skip(self))]
  async fn fetch_report_categories(&self) -> Result<Vec<ReportCategory>> {
    let mut conn = self.db_read().await?;
    let categories =
      sqlx::query_as::<_, ReportCategory>(r#"SELECT * FROM "report_categories" ORDER BY id"#)
        .fetch_all(&mut *conn)
        .await
        .into_db_error()?;

    Ok(categories)
  }

  #[tracing::instrument(skip(self, actor, comment), fields(actor.id = %actor.id))]
  async fn report_post(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    category_name: &str,
    comment: Option<&str>,
  ) -> Result<PostReport> {
    let mut tx = self.db_write().await?;
    let post = fetch_post(&mut tx, post_id).await?;
    let category_id = fetch_category_id(&mut tx, category_name).await?;
    rules::ensure_can_report_post(actor, &post)?;

    let report = sqlx::query_as::<_, PostReport>(
      r#"INSERT INTO "post_reports" (reporter_id, post_id, category_id, comment)
         VALUES ($1, $2, $3, $4)
         RETURNING *, $5::TEXT AS category_name"#,
    )
    .bind(actor.id)
    .bind(post.id)
    .bind(category_id)
    .bind(comment)
    .bind(category_name)
    .fetch_one(&mut *tx)
    .await
    .on_unique_violation(|| Error::conflict("You have already reported this post"))?;

    tx.commit().await.into_db_error()?;
    Ok(report)
  }

  #[tracing::instrument(skip(self, actor), fields(actor.id = %actor.id))]
  async fn fetch_reports_for_post(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
  ) -> Result<Vec<PostReport>> {
    let mut tx = self.db_write().await?;
    let post = fetch_moderated_post(&mut tx, actor, post_id).await?;

    let reports = sqlx::query_as::<_, PostReport>(&format!(
      "{SELECT_POST_REPORTS} WHERE r.post_id = $1 ORDER BY r.id DESC"
    ))
    .bind(post.id)
    .fetch_all(&mut *tx)
    .await
    .into_db_error()?;

    tx.commit().await.into_db_error()?;
    Ok(reports)
  }

  #[tracing::instrument(skip(self, actor), fields(actor.id = %actor.id))]
  async fn resolve_post_report(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    report_id: Id<PostReportMarker>,
    resolution: Resolution,
  ) -> Result<PostReport> {
    let mut tx = self.db_write().await?;
    let post = fetch_moderated_post(&mut tx, actor, post_id).await?;

    let status = sqlx::query_scalar::<_, ReportStatus>(
      r#"SELECT status FROM "post_reports"
         WHERE id = $1 AND post_id = $2
         FOR UPDATE"#,
    )
    .bind(report_id)
    .bind(post.id)
    .fetch_optional(&mut *tx)
    .await
    .into_db_error()?
    .ok_or_else(|| Error::not_found("Unknown report"))?;

    rules::ensure_pending(status)?;

    let report = sqlx::query_as::<_, PostReport>(
      r#"UPDATE "post_reports"
         SET status = $2, resolver_id = $3, resolved_at = (now() AT TIME ZONE 'utc')
         WHERE id = $1 AND status = 'pending'
         RETURNING *,
           (SELECT name FROM "report_categories" c WHERE c.id = category_id) AS category_name"#,
    )
    .bind(report_id)
    .bind(resolution.status())
    .bind(actor.id)
    .fetch_optional(&mut *tx)
    .await
    .into_db_error()?
    .ok_or_else(|| Error::conflict("This report is already resolved"))?;

    tx.commit().await.into_db_error()?;
    Ok(report)
  }

  #[tracing::instrument(skip(self, actor), fields(actor.id = %actor.id))]
  async fn fetch_reported_posts(&self, actor: &User) -> Result<Vec<Post>> {
    let mut conn = self.db_read().await?;
    let posts = sqlx::query_as::<_, Post>(
      r#"SELECT p.* FROM "posts" p
         WHERE EXISTS(
           SELECT 1 FROM "post_reports" r
           WHERE r.post_id = p.id AND r.status = 'pending'
         )
         AND ($1 OR EXISTS(
           SELECT 1 FROM "community_moderators" m
           WHERE m.community_id = p.community_id AND m.user_id = $2
         ))
         ORDER BY p.id DESC"#,
    )
    .bind(actor.is_staff)
    .bind(actor.id)
    .fetch_all(&mut *conn)
    .await
    .into_db_error()?;

    Ok(posts)
  }

  #[tracing::instrument(skip(self, actor), fields(actor.id = %actor.id))]
  async fn fetch_reports_by_user(&self, actor: &User) -> Result<Vec<PostReport>> {
    let mut conn = self.db_read().await?;
    let reports = sqlx::query_as::<_, PostReport>(&format!(
      "{SELECT_POST_REPORTS} WHERE r.reporter_id = $1 ORDER BY r.id DESC"
    ))
    .bind(actor.id)
    .fetch_all(&mut *conn)
    .await
    .into_db_error()?;

    Ok(reports)
  }

  #[tracing::instrument(skip(self, actor), fields(actor.id = %actor.id))]
  async fn fetch_reported_posts_for_community(
    &self,
    actor: &User,
    community_name: &str,
  ) -> Result<Vec<Post>> {
    let mut conn = self.db_read().await?;
    let community_id = fetch_moderated_community_id(&mut conn, actor, community_name).await?;

    let posts = sqlx::query_as::<_, Post>(
      r#"SELECT p.* FROM "posts" p
         WHERE p.community_id = $1
         AND EXISTS(
           SELECT 1 FROM "post_reports" r
           WHERE r.post_id = p.id AND r.status = 'pending'
         )
         ORDER BY p.id DESC"#,
    )
    .bind(community_id)
    .fetch_all(&mut *conn)
    .await
    .into_db_error()?;

    Ok(posts)
  }

  #[tracing::instrument(skip(self, actor), fields(actor.id = %actor.id))]
  async fn fetch_reported_comments_for_community(
    &self,
    actor: &User,
    community_name: &str,
  ) -> Result<Vec<PostComment>> {
    let mut conn = self.db_read().await?;
    let community_id = fetch_moderated_community_id(&mut conn, actor, community_name).await?;

    let comments = sqlx::query_as::<_, PostComment>(
      r#"SELECT pc.* FROM "post_comments" pc
         JOIN "posts" p ON p.id = pc.post_id
         WHERE p.community_id = $1
         AND EXISTS(
           SELECT 1 FROM "post_comment_reports" r
           WHERE r.post_comment_id = pc.id AND r.status = 'pending'
         )
         ORDER BY pc.id DESC"#,
    )
    .bind(community_id)
    .fetch_all(&mut *conn)
    .await
    .into_db_error()?;

    Ok(comments)
  }

  #[tracing::instrument(skip(self, actor, comment), fields(actor.id = %actor.id))]
  async fn report_comment(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    comment_id: Id<CommentMarker>,
    category_name: &str,
    comment: Option<&str>,
  ) -> Result<PostCommentReport> {
    let mut tx = self.db_write().await?;
    let post_comment = fetch_comment(&mut tx, post_id, comment_id).await?;
    let category_id = fetch_category_id(&mut tx, category_name).await?;
    rules::ensure_can_report_comment(actor, &post_comment)?;

    let report = sqlx::query_as::<_, PostCommentReport>(
      r#"INSERT INTO "post_comment_reports" (reporter_id, post_comment_id, category_id, comment)
         VALUES ($1, $2, $3, $4)
         RETURNING *, $5::TEXT AS category_name"#,
    )
    .bind(actor.id)
    .bind(post_comment.id)
    .bind(category_id)
    .bind(comment)
    .bind(category_name)
    .fetch_one(&mut *tx)
    .await
    .on_unique_violation(|| Error::conflict("You have already reported this comment"))?;

    tx.commit().await.into_db_error()?;
    Ok(report)
  }

  #[tracing::instrument(skip(self, actor), fields(actor.id = %actor.id))]
  async fn fetch_reports_for_comment(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    comment_id: Id<CommentMarker>,
  ) -> Result<Vec<PostCommentReport>> {
    let mut tx = self.db_write().await?;
    fetch_moderated_post(&mut tx, actor, post_id).await?;
    let comment = fetch_comment(&mut tx, post_id, comment_id).await?;

    let reports = sqlx::query_as::<_, PostCommentReport>(&format!(
      "{SELECT_COMMENT_REPORTS} WHERE r.post_comment_id = $1 ORDER BY r.id DESC"
    ))
    .bind(comment.id)
    .fetch_all(&mut *tx)
    .await
    .into_db_error()?;

    tx.commit().await.into_db_error()?;
    Ok(reports)
  }

  #[tracing::instrument(skip(self, actor), fields(actor.id = %actor.id))]
  async fn resolve_comment_report(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    comment_id: Id<CommentMarker>,
    report_id: Id<CommentReportMarker>,
    resolution: Resolution,
  ) -> Result<PostCommentReport> {
    let mut tx = self.db_write().await?;
    fetch_moderated_post(&mut tx, actor, post_id).await?;
    let comment = fetch_comment(&mut tx, post_id, comment_id).await?;

    let status = sqlx::query_scalar::<_, ReportStatus>(
      r#"SELECT status FROM "post_comment_reports"
         WHERE id = $1 AND post_comment_id = $2
         FOR UPDATE"#,
    )
    .bind(report_id)
    .bind(comment.id)
    .fetch_optional(&mut *tx)
    .await
    .into_db_error()?
    .ok_or_else(|| Error::not_found("Unknown report"))?;

    rules::ensure_pending(status)?;

    let report = sqlx::query_as::<_, PostCommentReport>(
      r#"UPDATE "post_comment_reports"
         SET status = $2, resolver_id = $3, resolved_at = (now() AT TIME ZONE 'utc')
         WHERE id = $1 AND status = 'pending'
         RETURNING *,
           (SELECT name FROM "report_categories" c WHERE c.id = category_id) AS category_name"#,
    )
    .bind(report_id)
    .bind(resolution.status())
    .bind(actor.id)
    .fetch_optional(&mut *tx)
    .await
    .into_db_error()?
    .ok_or_else(|| Error::conflict("This report is already resolved"))?;

    tx.commit().await.into_db_error()?;
    Ok(report)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::schema::AbstractComments;
  use crate::test_utils;
  use crate::types::Error as ErrorType;
  use sqlx::PgPool;

  #[sqlx::test(migrations = "./migrations")]
  #[ignore = "needs a Postgres server at DATABASE_URL"]
  async fn should_resolve_post_reports_once(pool: PgPool) {
    let db = PgDb::from_pool(pool);
    let alice = test_utils::user(&db, "alice").await;
    let bob = test_utils::user(&db, "bob").await;
    let staff = test_utils::staff(&db, "staff").await;
    let post = test_utils::post(&db, &alice, None).await;

    let report = db
      .report_post(&bob, post.id, "spam", Some("buy now"))
      .await
      .unwrap();
    assert_eq!(report.category_name, "spam");
    assert_eq!(report.status, ReportStatus::Pending);
    assert_eq!(report.comment.as_deref(), Some("buy now"));

    let reported = db.fetch_reported_posts(&staff).await.unwrap();
    assert_eq!(reported.iter().map(|p| p.id).collect::<Vec<_>>(), vec![post.id]);

    let error = db
      .confirm_post_report(&bob, post.id, report.id)
      .await
      .unwrap_err();
    assert!(matches!(error.as_type(), ErrorType::Forbidden(..)));

    let confirmed = db
      .confirm_post_report(&staff, post.id, report.id)
      .await
      .unwrap();
    assert_eq!(confirmed.status, ReportStatus::Confirmed);
    assert_eq!(confirmed.resolver_id, Some(staff.id));
    assert_eq!(confirmed.category_name, "spam");
    assert!(confirmed.resolved_at.is_some());

    let error = db
      .reject_post_report(&staff, post.id, report.id)
      .await
      .unwrap_err();
    assert!(matches!(
      error.as_type(),
      ErrorType::Conflict("This report is already resolved")
    ));

    assert!(db.fetch_reported_posts(&staff).await.unwrap().is_empty());
  }

  #[sqlx::test(migrations = "./migrations")]
  #[ignore = "needs a Postgres server at DATABASE_URL"]
  async fn should_reject_duplicate_and_invalid_reports(pool: PgPool) {
    let db = PgDb::from_pool(pool);
    let alice = test_utils::user(&db, "alice").await;
    let bob = test_utils::user(&db, "bob").await;
    let post = test_utils::post(&db, &alice, None).await;

    db.report_post(&bob, post.id, "spam", None).await.unwrap();
    let error = db.report_post(&bob, post.id, "abuse", None).await.unwrap_err();
    assert!(matches!(
      error.as_type(),
      ErrorType::Conflict("You have already reported this post")
    ));

    let error = db
      .report_post(&alice, post.id, "spam", None)
      .await
      .unwrap_err();
    assert!(matches!(error.as_type(), ErrorType::Forbidden(..)));

    let comment = db.comment_post(&alice, post.id, "Hi!").await.unwrap();
    let error = db
      .report_comment(&bob, post.id, comment.id, "nonsense", None)
      .await
      .unwrap_err();
    assert!(matches!(error.as_type(), ErrorType::InvalidFormBody(..)));

    let report = db
      .report_comment(&bob, post.id, comment.id, "hate_speech", None)
      .await
      .unwrap();
    assert_eq!(report.category_name, "hate_speech");
    assert_eq!(report.post_comment_id, comment.id);

    let error = db
      .report_comment(&bob, post.id, comment.id, "spam", None)
      .await
      .unwrap_err();
    assert!(matches!(
      error.as_type(),
      ErrorType::Conflict("You have already reported this comment")
    ));
  }

  #[sqlx::test(migrations = "./migrations")]
  #[ignore = "needs a Postgres server at DATABASE_URL"]
  async fn should_list_categories_from_migrations(pool: PgPool) {
    let db = PgDb::from_pool(pool);
    let categories = db.fetch_report_categories().await.unwrap();
    assert_eq!(categories, ReportCategory::defaults());
  }
}
