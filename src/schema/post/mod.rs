use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::types::id::{
  marker::{CommunityMarker, PostMarker, UserMarker},
  Id,
};

mod ops;
pub use ops::AbstractPosts;
pub(crate) use ops::{fetch_post, fetch_post_by_uuid};

/// A post is addressed by its [`Uuid`] publicly. The internal id
/// is still exposed since comments are keyed by it.
#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
pub struct Post {
  pub id: Id<PostMarker>,
  pub uuid: Uuid,
  pub created_at: NaiveDateTime,
  pub creator_id: Id<UserMarker>,
  pub community_id: Option<Id<CommunityMarker>>,
  pub text: String,
  pub comments_enabled: bool,
  pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy)]
pub struct InsertPost<'a> {
  pub text: &'a str,
  pub community_name: Option<&'a str>,
  pub comments_enabled: bool,
}
