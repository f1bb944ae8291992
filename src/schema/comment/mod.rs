use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::types::id::{
  marker::{CommentMarker, PostMarker, UserMarker},
  Id,
};

mod ops;
pub use ops::AbstractComments;
pub(crate) use ops::fetch_comment;

#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
pub struct PostComment {
  pub id: Id<CommentMarker>,
  pub post_id: Id<PostMarker>,
  pub created_at: NaiveDateTime,
  pub commenter_id: Id<UserMarker>,
  pub text: String,
}
