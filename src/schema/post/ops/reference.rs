use chrono::Utc;
use uuid::Uuid;

use crate::database::ReferenceDb;
use crate::error::{Error, Result};
use crate::schema::{rules, InsertPost, Post, User};
use crate::types::id::{marker::PostMarker, Id};

use super::AbstractPosts;

#[async_trait::async_trait]
impl AbstractPosts for ReferenceDb {
  async fn insert_post(&self, creator: &User, post: InsertPost<'_>) -> Result<Post> {
    let mut state = self.lock().await;
    let community_id = match post.community_name {
      Some(name) => {
        let community = state
          .community_by_name(name)
          .ok_or_else(|| Error::not_found("Unknown community"))?;
        Some(community.id)
      }
      None => None,
    };

    let post = Post {
      id: state.next_id(),
      uuid: Uuid::new_v4(),
      created_at: Utc::now().naive_utc(),
      creator_id: creator.id,
      community_id,
      text: post.text.to_string(),
      comments_enabled: post.comments_enabled,
      updated_at: None,
    };
    state.posts.insert(post.id, post.clone());
    Ok(post)
  }

  async fn fetch_post_by_uuid(&self, uuid: Uuid) -> Result<Option<Post>> {
    let state = self.lock().await;
    Ok(state.post_by_uuid(uuid).cloned())
  }

  async fn fetch_post_id_by_uuid(&self, uuid: Uuid) -> Result<Id<PostMarker>> {
    let state = self.lock().await;
    state
      .post_by_uuid(uuid)
      .map(|p| p.id)
      .ok_or_else(|| Error::not_found("Unknown post"))
  }

  async fn delete_post(&self, actor: &User, uuid: Uuid) -> Result<()> {
    let mut state = self.lock().await;
    let post = state
      .post_by_uuid(uuid)
      .ok_or_else(|| Error::not_found("Unknown post"))?;

    let is_moderator = state.is_moderator(post.community_id, actor.id);
    rules::ensure_can_delete_post(actor, post, is_moderator)?;

    let id = post.id;
    state.remove_post(id);
    Ok(())
  }
}
