//! Permission rules shared by every database driver.
//!
//! Drivers load whatever rows they need first, then call these
//! functions before mutating anything.
use crate::error::{Error, Result};
use crate::schema::{Post, PostComment, ReportStatus, User};
use crate::types;

/// Whether `user` can moderate content of a community.
///
/// `is_community_moderator` must be `false` for content
/// outside of any community so only staff can moderate it.
#[must_use]
pub fn can_moderate(user: &User, is_community_moderator: bool) -> bool {
  user.is_staff || is_community_moderator
}

pub fn ensure_can_moderate(user: &User, is_community_moderator: bool) -> Result<()> {
  if can_moderate(user, is_community_moderator) {
    Ok(())
  } else {
    Err(Error::forbidden("You are not allowed to moderate this content"))
  }
}

pub fn ensure_can_comment(user: &User, post: &Post, is_community_moderator: bool) -> Result<()> {
  if post.comments_enabled
    || post.creator_id == user.id
    || can_moderate(user, is_community_moderator)
  {
    Ok(())
  } else {
    Err(Error::forbidden("Comments are disabled for this post"))
  }
}

pub fn ensure_can_delete_comment(
  user: &User,
  post: &Post,
  comment: &PostComment,
  is_community_moderator: bool,
) -> Result<()> {
  if comment.commenter_id == user.id
    || post.creator_id == user.id
    || can_moderate(user, is_community_moderator)
  {
    Ok(())
  } else {
    Err(Error::forbidden("You are not allowed to delete this comment"))
  }
}

pub fn ensure_can_delete_post(user: &User, post: &Post, is_community_moderator: bool) -> Result<()> {
  if post.creator_id == user.id || can_moderate(user, is_community_moderator) {
    Ok(())
  } else {
    Err(Error::forbidden("You are not allowed to delete this post"))
  }
}

pub fn ensure_can_report_post(user: &User, post: &Post) -> Result<()> {
  if post.creator_id == user.id {
    Err(Error::forbidden("You cannot report your own post"))
  } else {
    Ok(())
  }
}

pub fn ensure_can_report_comment(user: &User, comment: &PostComment) -> Result<()> {
  if comment.commenter_id == user.id {
    Err(Error::forbidden("You cannot report your own comment"))
  } else {
    Ok(())
  }
}

/// Error for a report filed under a category that does not exist.
#[must_use]
pub fn unknown_category() -> Error {
  Error::new(types::Error::invalid_field(
    "category_name",
    "unknown_category",
    "Unknown report category",
  ))
}

pub fn ensure_pending(status: ReportStatus) -> Result<()> {
  if status == ReportStatus::Pending {
    Ok(())
  } else {
    Err(Error::conflict("This report is already resolved"))
  }
}
