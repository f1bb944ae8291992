use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::types::id::{
  marker::{CommunityMarker, UserMarker},
  Id,
};

mod ops;
pub use ops::AbstractCommunities;
pub(crate) use ops::{fetch_community_by_name, is_moderator};

#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
pub struct Community {
  pub id: Id<CommunityMarker>,
  pub created_at: NaiveDateTime,
  pub name: String,
  pub title: String,
  pub creator_id: Id<UserMarker>,
}

/// Membership of a user in the moderator team of a community.
///
/// Administrators can add other moderators. The creator of a
/// community is its first administrator.
#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
pub struct CommunityModerator {
  pub community_id: Id<CommunityMarker>,
  pub user_id: Id<UserMarker>,
  pub is_administrator: bool,
  pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy)]
pub struct InsertCommunity<'a> {
  pub name: &'a str,
  pub title: &'a str,
}
