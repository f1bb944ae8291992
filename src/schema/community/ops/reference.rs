use chrono::Utc;

use crate::database::ReferenceDb;
use crate::error::{Error, Result};
use crate::schema::{Community, CommunityModerator, InsertCommunity, User};

use super::AbstractCommunities;

#[async_trait::async_trait]
impl AbstractCommunities for ReferenceDb {
  async fn insert_community(
    &self,
    creator: &User,
    community: InsertCommunity<'_>,
  ) -> Result<Community> {
    let mut state = self.lock().await;
    if state.community_by_name(community.name).is_some() {
      return Err(Error::conflict("This community name is taken"));
    }

    let now = Utc::now().naive_utc();
    let community = Community {
      id: state.next_id(),
      created_at: now,
      name: community.name.to_string(),
      title: community.title.to_string(),
      creator_id: creator.id,
    };

    state.communities.insert(community.id, community.clone());
    state.moderators.push(CommunityModerator {
      community_id: community.id,
      user_id: creator.id,
      is_administrator: true,
      created_at: now,
    });

    Ok(community)
  }

  async fn fetch_community_by_name(&self, name: &str) -> Result<Option<Community>> {
    let state = self.lock().await;
    Ok(state.community_by_name(name).cloned())
  }

  async fn add_community_moderator(
    &self,
    actor: &User,
    community_name: &str,
    username: &str,
  ) -> Result<CommunityModerator> {
    let mut state = self.lock().await;
    let community_id = state
      .community_by_name(community_name)
      .map(|c| c.id)
      .ok_or_else(|| Error::not_found("Unknown community"))?;

    if !actor.is_staff && !state.is_administrator(community_id, actor.id) {
      return Err(Error::forbidden(
        "Only administrators can add moderators to this community",
      ));
    }

    let user_id = state
      .users
      .values()
      .find(|u| u.name == username)
      .map(|u| u.id)
      .ok_or_else(|| Error::not_found("Unknown user"))?;

    if state.is_moderator(Some(community_id), user_id) {
      return Err(Error::conflict("This user is already a moderator"));
    }

    let moderator = CommunityModerator {
      community_id,
      user_id,
      is_administrator: false,
      created_at: Utc::now().naive_utc(),
    };
    state.moderators.push(moderator.clone());
    Ok(moderator)
  }
}
