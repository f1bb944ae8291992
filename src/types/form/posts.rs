use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::validation::{not_blank, validate_community_name, POST_TEXT_MAX};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreatePost {
  #[validate(length(min = 1, max = "POST_TEXT_MAX"), custom = "not_blank")]
  pub text: String,
  #[validate(custom = "validate_community_name")]
  pub community_name: Option<String>,
  #[serde(default = "CreatePost::default_comments_enabled")]
  pub comments_enabled: bool,
}

impl CreatePost {
  const fn default_comments_enabled() -> bool {
    true
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::form::tests::must_fail;
  use crate::types::validation::POST_TEXT_MAX;

  #[test]
  fn test_defaults() {
    let form: CreatePost = serde_json::from_str(r#"{ "text": "Hello" }"#).unwrap();
    assert!(form.comments_enabled);
    assert!(form.community_name.is_none());
    assert!(form.validate().is_ok());
  }

  #[test]
  fn test_fields() {
    let form = CreatePost {
      text: "a".repeat(POST_TEXT_MAX + 1),
      community_name: None,
      comments_enabled: true,
    };
    must_fail(&form, format_args!("too long"));

    let form = CreatePost {
      text: "Hello".into(),
      community_name: Some("Not A Name".into()),
      comments_enabled: true,
    };
    must_fail(&form, format_args!("invalid community name"));
  }
}
