use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::validation::{not_blank, REPORT_CATEGORY_NAME_MAX, REPORT_COMMENT_MAX};

/// Body of both post and comment reports.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateReport {
  #[validate(length(min = 1, max = "REPORT_CATEGORY_NAME_MAX"), custom = "not_blank")]
  pub category_name: String,
  #[validate(length(max = "REPORT_COMMENT_MAX"))]
  pub comment: Option<String>,
}
