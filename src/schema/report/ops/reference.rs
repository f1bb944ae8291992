use chrono::Utc;

use crate::database::{ReferenceDb, ReferenceState};
use crate::error::{Error, Result};
use crate::schema::{
  rules, Community, Post, PostComment, PostCommentReport, PostReport, ReportCategory,
  ReportStatus, Resolution, User,
};
use crate::types::id::{
  marker::{CommentMarker, CommentReportMarker, PostMarker, PostReportMarker},
  Id,
};

use super::AbstractReports;

impl ReferenceState {
  fn category_name(&self, name: &str) -> Result<String> {
    self
      .categories
      .iter()
      .find(|c| c.name == name)
      .map(|c| c.name.clone())
      .ok_or_else(rules::unknown_category)
  }

  fn moderated_post(&self, actor: &User, post_id: Id<PostMarker>) -> Result<&Post> {
    let post = self
      .posts
      .get(&post_id)
      .ok_or_else(|| Error::not_found("Unknown post"))?;

    rules::ensure_can_moderate(actor, self.is_moderator(post.community_id, actor.id))?;
    Ok(post)
  }

  fn moderated_community(&self, actor: &User, name: &str) -> Result<&Community> {
    let community = self
      .community_by_name(name)
      .ok_or_else(|| Error::not_found("Unknown community"))?;

    rules::ensure_can_moderate(actor, self.is_moderator(Some(community.id), actor.id))?;
    Ok(community)
  }

  fn is_post_reported(&self, post_id: Id<PostMarker>) -> bool {
    self
      .post_reports
      .values()
      .any(|r| r.post_id == post_id && r.status == ReportStatus::Pending)
  }

  fn is_comment_reported(&self, comment_id: Id<CommentMarker>) -> bool {
    self
      .comment_reports
      .values()
      .any(|r| r.post_comment_id == comment_id && r.status == ReportStatus::Pending)
  }
}

#[async_trait::async_trait]
impl AbstractReports for ReferenceDb {
  async fn fetch_report_categories(&self) -> Result<Vec<ReportCategory>> {
    let state = self.lock().await;
    Ok(state.categories.clone())
  }

  async fn report_post(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    category_name: &str,
    comment: Option<&str>,
  ) -> Result<PostReport> {
    let mut state = self.lock().await;
    let post = state
      .posts
      .get(&post_id)
      .ok_or_else(|| Error::not_found("Unknown post"))?;

    let category_name = state.category_name(category_name)?;
    rules::ensure_can_report_post(actor, post)?;

    let reported = state
      .post_reports
      .values()
      .any(|r| r.reporter_id == actor.id && r.post_id == post_id);

    if reported {
      return Err(Error::conflict("You have already reported this post"));
    }

    let report = PostReport {
      id: state.next_id(),
      created_at: Utc::now().naive_utc(),
      post_id,
      reporter_id: actor.id,
      category_name,
      comment: comment.map(ToString::to_string),
      status: ReportStatus::Pending,
      resolver_id: None,
      resolved_at: None,
    };
    state.post_reports.insert(report.id, report.clone());
    Ok(report)
  }

  async fn fetch_reports_for_post(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
  ) -> Result<Vec<PostReport>> {
    let state = self.lock().await;
    state.moderated_post(actor, post_id)?;

    let reports = state
      .post_reports
      .values()
      .rev()
      .filter(|r| r.post_id == post_id)
      .cloned()
      .collect();

    Ok(reports)
  }

  async fn resolve_post_report(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    report_id: Id<PostReportMarker>,
    resolution: Resolution,
  ) -> Result<PostReport> {
    let mut state = self.lock().await;
    state.moderated_post(actor, post_id)?;

    let report = state
      .post_reports
      .get_mut(&report_id)
      .filter(|r| r.post_id == post_id)
      .ok_or_else(|| Error::not_found("Unknown report"))?;

    rules::ensure_pending(report.status)?;
    report.status = resolution.status();
    report.resolver_id = Some(actor.id);
    report.resolved_at = Some(Utc::now().naive_utc());
    Ok(report.clone())
  }

  async fn fetch_reported_posts(&self, actor: &User) -> Result<Vec<Post>> {
    let state = self.lock().await;
    let posts = state
      .posts
      .values()
      .rev()
      .filter(|p| state.is_post_reported(p.id))
      .filter(|p| rules::can_moderate(actor, state.is_moderator(p.community_id, actor.id)))
      .cloned()
      .collect();

    Ok(posts)
  }

  async fn fetch_reports_by_user(&self, actor: &User) -> Result<Vec<PostReport>> {
    let state = self.lock().await;
    let reports = state
      .post_reports
      .values()
      .rev()
      .filter(|r| r.reporter_id == actor.id)
      .cloned()
      .collect();

    Ok(reports)
  }

  async fn fetch_reported_posts_for_community(
    &self,
    actor: &User,
    community_name: &str,
  ) -> Result<Vec<Post>> {
    let state = self.lock().await;
    let community_id = state.moderated_community(actor, community_name)?.id;

    let posts = state
      .posts
      .values()
      .rev()
      .filter(|p| p.community_id == Some(community_id) && state.is_post_reported(p.id))
      .cloned()
      .collect();

    Ok(posts)
  }

  async fn fetch_reported_comments_for_community(
    &self,
    actor: &User,
    community_name: &str,
  ) -> Result<Vec<PostComment>> {
    let state = self.lock().await;
    let community_id = state.moderated_community(actor, community_name)?.id;

    let comments = state
      .comments
      .values()
      .rev()
      .filter(|c| {
        let in_community = state
          .posts
          .get(&c.post_id)
          .is_some_and(|p| p.community_id == Some(community_id));

        in_community && state.is_comment_reported(c.id)
      })
      .cloned()
      .collect();

    Ok(comments)
  }

  async fn report_comment(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    comment_id: Id<CommentMarker>,
    category_name: &str,
    comment: Option<&str>,
  ) -> Result<PostCommentReport> {
    let mut state = self.lock().await;
    let post_comment = state
      .comment_for_post(post_id, comment_id)
      .ok_or_else(|| Error::not_found("Unknown comment"))?;

    let category_name = state.category_name(category_name)?;
    rules::ensure_can_report_comment(actor, post_comment)?;

    let reported = state
      .comment_reports
      .values()
      .any(|r| r.reporter_id == actor.id && r.post_comment_id == comment_id);

    if reported {
      return Err(Error::conflict("You have already reported this comment"));
    }

    let report = PostCommentReport {
      id: state.next_id(),
      created_at: Utc::now().naive_utc(),
      post_comment_id: comment_id,
      reporter_id: actor.id,
      category_name,
      comment: comment.map(ToString::to_string),
      status: ReportStatus::Pending,
      resolver_id: None,
      resolved_at: None,
    };
    state.comment_reports.insert(report.id, report.clone());
    Ok(report)
  }

  async fn fetch_reports_for_comment(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    comment_id: Id<CommentMarker>,
  ) -> Result<Vec<PostCommentReport>> {
    let state = self.lock().await;
    state.moderated_post(actor, post_id)?;
    state
      .comment_for_post(post_id, comment_id)
      .ok_or_else(|| Error::not_found("Unknown comment"))?;

    let reports = state
      .comment_reports
      .values()
      .rev()
      .filter(|r| r.post_comment_id == comment_id)
      .cloned()
      .collect();

    Ok(reports)
  }

  async fn resolve_comment_report(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    comment_id: Id<CommentMarker>,
    report_id: Id<CommentReportMarker>,
    resolution: Resolution,
  ) -> Result<PostCommentReport> {
    let mut state = self.lock().await;
    state.moderated_post(actor, post_id)?;
    state
      .comment_for_post(post_id, comment_id)
      .ok_or_else(|| Error::not_found("Unknown comment"))?;

    let report = state
      .comment_reports
      .get_mut(&report_id)
      .filter(|r| r.post_comment_id == comment_id)
      .ok_or_else(|| Error::not_found("Unknown report"))?;

    rules::ensure_pending(report.status)?;
    report.status = resolution.status();
    report.resolver_id = Some(actor.id);
    report.resolved_at = Some(Utc::now().naive_utc());
    Ok(report.clone())
  }
}
