use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::schema::{
  Community, CommunityModerator, Post, PostComment, PostCommentReport, PostReport, ReportCategory,
  User,
};
use crate::types::id::marker::{
  CommentMarker, CommentReportMarker, CommunityMarker, Marker, PostMarker, PostReportMarker,
  UserMarker,
};
use crate::types::id::Id;

/// Reference implementation
///
/// Every operation holds the lock of the whole state until it
/// finishes so each one of them is atomic like a transaction.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDb {
  state: Arc<Mutex<ReferenceState>>,
}

impl ReferenceDb {
  pub(crate) async fn lock(&self) -> MutexGuard<'_, ReferenceState> {
    self.state.lock().await
  }
}

#[derive(Debug)]
pub struct ReferenceState {
  pub(crate) users: BTreeMap<Id<UserMarker>, User>,
  pub(crate) communities: BTreeMap<Id<CommunityMarker>, Community>,
  pub(crate) moderators: Vec<CommunityModerator>,
  pub(crate) posts: BTreeMap<Id<PostMarker>, Post>,
  pub(crate) comments: BTreeMap<Id<CommentMarker>, PostComment>,
  pub(crate) categories: Vec<ReportCategory>,
  pub(crate) post_reports: BTreeMap<Id<PostReportMarker>, PostReport>,
  pub(crate) comment_reports: BTreeMap<Id<CommentReportMarker>, PostCommentReport>,
  sequence: u64,
}

impl Default for ReferenceState {
  fn default() -> Self {
    Self {
      users: BTreeMap::new(),
      communities: BTreeMap::new(),
      moderators: Vec::new(),
      posts: BTreeMap::new(),
      comments: BTreeMap::new(),
      categories: ReportCategory::defaults(),
      post_reports: BTreeMap::new(),
      comment_reports: BTreeMap::new(),
      sequence: 0,
    }
  }
}

impl ReferenceState {
  /// Generates a new ID. IDs are never reused even after
  /// their rows are deleted.
  pub(crate) fn next_id<M: Marker>(&mut self) -> Id<M> {
    self.sequence += 1;
    Id::new(self.sequence)
  }

  pub(crate) fn is_moderator(
    &self,
    community_id: Option<Id<CommunityMarker>>,
    user_id: Id<UserMarker>,
  ) -> bool {
    let Some(community_id) = community_id else {
      return false;
    };
    self
      .moderators
      .iter()
      .any(|m| m.community_id == community_id && m.user_id == user_id)
  }

  pub(crate) fn is_administrator(
    &self,
    community_id: Id<CommunityMarker>,
    user_id: Id<UserMarker>,
  ) -> bool {
    self
      .moderators
      .iter()
      .any(|m| m.community_id == community_id && m.user_id == user_id && m.is_administrator)
  }

  pub(crate) fn community_by_name(&self, name: &str) -> Option<&Community> {
    self.communities.values().find(|c| c.name == name)
  }

  pub(crate) fn post_by_uuid(&self, uuid: Uuid) -> Option<&Post> {
    self.posts.values().find(|p| p.uuid == uuid)
  }

  pub(crate) fn comment_for_post(
    &self,
    post_id: Id<PostMarker>,
    comment_id: Id<CommentMarker>,
  ) -> Option<&PostComment> {
    self
      .comments
      .get(&comment_id)
      .filter(|c| c.post_id == post_id)
  }

  /// Deletes a comment with every report filed against it.
  pub(crate) fn remove_comment(&mut self, id: Id<CommentMarker>) {
    self.comments.remove(&id);
    self.comment_reports.retain(|_, r| r.post_comment_id != id);
  }

  /// Deletes a post with its comments and every report filed
  /// against the post or its comments.
  pub(crate) fn remove_post(&mut self, id: Id<PostMarker>) {
    self.posts.remove(&id);
    self.post_reports.retain(|_, r| r.post_id != id);

    let comments = self
      .comments
      .values()
      .filter(|c| c.post_id == id)
      .map(|c| c.id)
      .collect::<Vec<_>>();

    for comment in comments {
      self.remove_comment(comment);
    }
  }
}
