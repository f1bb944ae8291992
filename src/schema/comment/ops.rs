use std::num::NonZeroU32;

use crate::error::Result;
use crate::schema::User;
use crate::types::id::{
  marker::{CommentMarker, PostMarker},
  Id,
};

use super::PostComment;

mod postgres;
mod reference;

pub(crate) use postgres::fetch_comment;

#[async_trait::async_trait]
pub trait AbstractComments: Sync + Send {
  /// Fetches comments of a post from newest to oldest.
  ///
  /// Only comments older than `max_id` are returned if it is set.
  async fn fetch_comments_for_post(
    &self,
    post_id: Id<PostMarker>,
    max_id: Option<Id<CommentMarker>>,
    limit: NonZeroU32,
  ) -> Result<Vec<PostComment>>;

  async fn comment_post(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    text: &str,
  ) -> Result<PostComment>;

  /// Deletes a comment if `actor` wrote it, created the post
  /// or can moderate the post.
  async fn delete_comment_for_post(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    comment_id: Id<CommentMarker>,
  ) -> Result<()>;
}
