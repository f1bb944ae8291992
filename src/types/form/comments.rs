use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use validator::Validate;

use crate::types::id::{marker::CommentMarker, Id};
use crate::types::validation::{
  not_blank, COMMENTS_DEFAULT_LIMIT, COMMENTS_MAX_LIMIT, POST_COMMENT_TEXT_MAX,
};

/// Query of `GET /posts/{post_id}/comments`
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct GetPostComments {
  /// Only comments older than this one are returned.
  pub max_id: Option<Id<CommentMarker>>,
  #[validate(range(min = 1, max = "COMMENTS_MAX_LIMIT"))]
  pub limit: Option<u32>,
}

impl GetPostComments {
  /// Validated limit or the default one.
  #[must_use]
  pub fn limit(&self) -> NonZeroU32 {
    self
      .limit
      .and_then(NonZeroU32::new)
      .unwrap_or(Self::DEFAULT_LIMIT)
  }

  const DEFAULT_LIMIT: NonZeroU32 = match NonZeroU32::new(COMMENTS_DEFAULT_LIMIT as u32) {
    Some(n) => n,
    None => panic!("COMMENTS_DEFAULT_LIMIT is accidentally set to 0"),
  };
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CommentPost {
  #[validate(length(min = 1, max = "POST_COMMENT_TEXT_MAX"), custom = "not_blank")]
  pub text: String,
}
