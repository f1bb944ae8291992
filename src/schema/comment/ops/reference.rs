use chrono::Utc;
use std::num::NonZeroU32;

use crate::database::ReferenceDb;
use crate::error::{Error, Result};
use crate::schema::{rules, PostComment, User};
use crate::types::id::{
  marker::{CommentMarker, PostMarker},
  Id,
};

use super::AbstractComments;

#[async_trait::async_trait]
impl AbstractComments for ReferenceDb {
  async fn fetch_comments_for_post(
    &self,
    post_id: Id<PostMarker>,
    max_id: Option<Id<CommentMarker>>,
    limit: NonZeroU32,
  ) -> Result<Vec<PostComment>> {
    let state = self.lock().await;
    if !state.posts.contains_key(&post_id) {
      return Err(Error::not_found("Unknown post"));
    }

    let comments = state
      .comments
      .values()
      .rev()
      .filter(|c| c.post_id == post_id)
      .filter(|c| max_id.map_or(true, |max_id| c.id < max_id))
      .take(limit.get() as usize)
      .cloned()
      .collect();

    Ok(comments)
  }

  async fn comment_post(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    text: &str,
  ) -> Result<PostComment> {
    let mut state = self.lock().await;
    let post = state
      .posts
      .get(&post_id)
      .ok_or_else(|| Error::not_found("Unknown post"))?;

    let is_moderator = state.is_moderator(post.community_id, actor.id);
    rules::ensure_can_comment(actor, post, is_moderator)?;

    let comment = PostComment {
      id: state.next_id(),
      post_id,
      created_at: Utc::now().naive_utc(),
      commenter_id: actor.id,
      text: text.to_string(),
    };
    state.comments.insert(comment.id, comment.clone());
    Ok(comment)
  }

  async fn delete_comment_for_post(
    &self,
    actor: &User,
    post_id: Id<PostMarker>,
    comment_id: Id<CommentMarker>,
  ) -> Result<()> {
    let mut state = self.lock().await;
    let post = state
      .posts
      .get(&post_id)
      .ok_or_else(|| Error::not_found("Unknown post"))?;

    let comment = state
      .comment_for_post(post_id, comment_id)
      .ok_or_else(|| Error::not_found("Unknown comment"))?;

    let is_moderator = state.is_moderator(post.community_id, actor.id);
    rules::ensure_can_delete_comment(actor, post, comment, is_moderator)?;

    state.remove_comment(comment_id);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::schema::{AbstractCommunities, InsertCommunity};
  use crate::test_utils;
  use crate::types::Error as ErrorType;

  fn limit(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
  }

  #[tokio::test]
  async fn should_page_comments_from_newest() {
    let db = ReferenceDb::default();
    let alice = test_utils::user(&db, "alice").await;
    let post = test_utils::post(&db, &alice, None).await;

    let mut ids = Vec::new();
    for i in 0..5 {
      let comment = db.comment_post(&alice, post.id, &format!("#{i}")).await.unwrap();
      ids.push(comment.id);
    }

    let page = db.fetch_comments_for_post(post.id, None, limit(2)).await.unwrap();
    assert_eq!(page.iter().map(|c| c.id).collect::<Vec<_>>(), vec![ids[4], ids[3]]);

    let page = db
      .fetch_comments_for_post(post.id, Some(ids[3]), limit(10))
      .await
      .unwrap();
    assert_eq!(
      page.iter().map(|c| c.id).collect::<Vec<_>>(),
      vec![ids[2], ids[1], ids[0]]
    );
  }

  #[tokio::test]
  async fn should_not_mix_comments_of_other_posts() {
    let db = ReferenceDb::default();
    let alice = test_utils::user(&db, "alice").await;
    let first = test_utils::post(&db, &alice, None).await;
    let second = test_utils::post(&db, &alice, None).await;

    let comment = db.comment_post(&alice, first.id, "first").await.unwrap();
    db.comment_post(&alice, second.id, "second").await.unwrap();

    let page = db.fetch_comments_for_post(first.id, None, limit(10)).await.unwrap();
    assert_eq!(page, vec![comment.clone()]);

    let error = db
      .delete_comment_for_post(&alice, second.id, comment.id)
      .await
      .unwrap_err();
    assert!(matches!(error.as_type(), ErrorType::NotFound("Unknown comment")));
  }

  #[tokio::test]
  async fn should_respect_disabled_comments() {
    let db = ReferenceDb::default();
    let alice = test_utils::user(&db, "alice").await;
    let bob = test_utils::user(&db, "bob").await;
    let carol = test_utils::user(&db, "carol").await;

    let community = InsertCommunity {
      name: "rust",
      title: "Rust",
    };
    db.insert_community(&carol, community).await.unwrap();

    let post = test_utils::post_with(&db, &alice, Some("rust"), false).await;
    let error = db.comment_post(&bob, post.id, "Hi!").await.unwrap_err();
    assert!(matches!(error.as_type(), ErrorType::Forbidden(..)));

    db.comment_post(&alice, post.id, "Mine").await.unwrap();
    db.comment_post(&carol, post.id, "Moderator").await.unwrap();
  }

  #[tokio::test]
  async fn should_check_who_deletes_comments() {
    let db = ReferenceDb::default();
    let alice = test_utils::user(&db, "alice").await;
    let bob = test_utils::user(&db, "bob").await;
    let eve = test_utils::user(&db, "eve").await;

    let post = test_utils::post(&db, &alice, None).await;
    let comment = db.comment_post(&bob, post.id, "Hi!").await.unwrap();

    let error = db
      .delete_comment_for_post(&eve, post.id, comment.id)
      .await
      .unwrap_err();
    assert!(matches!(error.as_type(), ErrorType::Forbidden(..)));

    db.delete_comment_for_post(&alice, post.id, comment.id)
      .await
      .unwrap();

    let page = db.fetch_comments_for_post(post.id, None, limit(10)).await.unwrap();
    assert!(page.is_empty());
  }
}
