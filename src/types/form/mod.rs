//! Request and response bodies of the HTTP API.
pub mod comments;
pub mod communities;
pub mod posts;
pub mod reports;
pub mod users;

/// Acknowledgement sent back by routes with nothing else to return.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct Done {
  pub message: std::borrow::Cow<'static, str>,
}

impl Default for Done {
  fn default() -> Self {
    Self {
      message: "Done!".into(),
    }
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use validator::Validate;

  #[track_caller]
  pub fn must_fail<T: Validate>(value: &T, args: std::fmt::Arguments<'_>) {
    if value.validate().is_ok() {
      panic!("expected to fail but passed (entry = {args})");
    }
  }

  #[test]
  fn test_done() {
    assert_eq!(
      serde_json::to_value(super::Done::default()).unwrap(),
      serde_json::json!({ "message": "Done!" })
    );
  }
}
