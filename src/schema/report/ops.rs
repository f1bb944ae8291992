use crate::error::Result;
use crate::schema::{Post, PostComment, User};
use crate::types::id::{
  marker::{CommentMarker, CommentReportMarker, PostMarker, PostReportMarker},
  Id,
};

use super::{PostCommentReport, PostReport, ReportCategory, Resolution};

mod postgres;
mod reference;

#[async_trait::async_trait]
pub trait AbstractReports: Sync + Send {
  async fn fetch_report_categories(&self) -> Result<Vec<ReportCategory>>;

  /// Files a report against a post. Users cannot report their own
  /// posts nor report the same post twice.
  async fn report_post(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    category_name: &str,
    comment: Option<&str>,
  ) -> Result<PostReport>;

  /// Every report filed against a post. Requires moderation rights.
  async fn fetch_reports_for_post(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
  ) -> Result<Vec<PostReport>>;

  /// Resolves a pending report of a post. Requires moderation rights.
  async fn resolve_post_report(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    report_id: Id<PostReportMarker>,
    resolution: Resolution,
  ) -> Result<PostReport>;

  async fn confirm_post_report(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    report_id: Id<PostReportMarker>,
  ) -> Result<PostReport> {
    self
      .resolve_post_report(actor, post_id, report_id, Resolution::Confirm)
      .await
  }

  async fn reject_post_report(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    report_id: Id<PostReportMarker>,
  ) -> Result<PostReport> {
    self
      .resolve_post_report(actor, post_id, report_id, Resolution::Reject)
      .await
  }

  /// Posts with pending reports that `actor` can moderate.
  async fn fetch_reported_posts(&self, actor: &User) -> Result<Vec<Post>>;

  /// Post reports filed by `actor`.
  async fn fetch_reports_by_user(&self, actor: &User) -> Result<Vec<PostReport>>;

  async fn fetch_reported_posts_for_community(
    &self,
    actor: &User,
    community_name: &str,
  ) -> Result<Vec<Post>>;

  async fn fetch_reported_comments_for_community(
    &self,
    actor: &User,
    community_name: &str,
  ) -> Result<Vec<PostComment>>;

  async fn report_comment(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    comment_id: Id<CommentMarker>,
    category_name: &str,
    comment: Option<&str>,
  ) -> Result<PostCommentReport>;

  async fn fetch_reports_for_comment(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    comment_id: Id<CommentMarker>,
  ) -> Result<Vec<PostCommentReport>>;

  async fn resolve_comment_report(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    comment_id: Id<CommentMarker>,
    report_id: Id<CommentReportMarker>,
    resolution: Resolution,
  ) -> Result<PostCommentReport>;

  async fn confirm_comment_report(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    comment_id: Id<CommentMarker>,
    report_id: Id<CommentReportMarker>,
  ) -> Result<PostCommentReport> {
    self
      .resolve_comment_report(actor, post_id, comment_id, report_id, Resolution::Confirm)
      .await
  }

  async fn reject_comment_report(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    comment_id: Id<CommentMarker>,
    report_id: Id<CommentReportMarker>,
  ) -> Result<PostCommentReport> {
    self
      .resolve_comment_report(actor, post_id, comment_id, report_id, Resolution::Reject)
      .await
  }
}
