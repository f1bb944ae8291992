use uuid::Uuid;

use crate::error::Result;
use crate::schema::User;
use crate::types::id::{marker::PostMarker, Id};

use super::{InsertPost, Post};

mod postgres;
mod reference;

pub(crate) use postgres::{fetch_post, fetch_post_by_uuid};

#[async_trait::async_trait]
pub trait AbstractPosts: Sync + Send {
  async fn insert_post(&self, creator: &User, post: InsertPost<'_>) -> Result<Post>;

  async fn fetch_post_by_uuid(&self, uuid: Uuid) -> Result<Option<Post>>;

  /// Resolves the public id of a post into its internal id.
  async fn fetch_post_id_by_uuid(&self, uuid: Uuid) -> Result<Id<PostMarker>>;

  /// Deletes a post with its comments and reports. Only the creator
  /// or anyone who can moderate the post can delete it.
  async fn delete_post(&self, actor: &User, uuid: Uuid) -> Result<()>;
}
