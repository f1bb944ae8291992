use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::validation::{
  not_blank, validate_community_name, validate_username, COMMUNITY_TITLE_MAX,
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateCommunity {
  #[validate(custom = "validate_community_name")]
  pub name: String,
  #[validate(length(min = 1, max = "COMMUNITY_TITLE_MAX"), custom = "not_blank")]
  pub title: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AddModerator {
  #[validate(custom = "validate_username")]
  pub username: String,
}
