use crate::error::Result;
use crate::schema::User;

use super::{Community, CommunityModerator, InsertCommunity};

mod postgres;
mod reference;

pub(crate) use postgres::{fetch_community_by_name, is_moderator};

#[async_trait::async_trait]
pub trait AbstractCommunities: Sync + Send {
  /// Creates a community with `creator` as its administrator.
  async fn insert_community(
    &self,
    creator: &User,
    community: InsertCommunity<'_>,
  ) -> Result<Community>;

  async fn fetch_community_by_name(&self, name: &str) -> Result<Option<Community>>;

  /// Adds `username` to the moderators of a community.
  ///
  /// Only administrators of the community and staff members
  /// can do this.
  async fn add_community_moderator(
    &self,
    actor: &User,
    community_name: &str,
    username: &str,
  ) -> Result<CommunityModerator>;
}
