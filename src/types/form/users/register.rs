use crate::{
  types::{
    id::{marker::UserMarker, Id},
    validation::{self, validate_password, validate_username},
  },
  util::Sensitive,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, Deserialize, Serialize)]
pub struct Request {
  pub username: String,
  pub display_name: Option<String>,
  pub password: Sensitive<String>,
  pub confirm_password: Sensitive<String>,
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if let Err(error) = validate_username(&self.username) {
      errors.add("username", error);
    }

    if let Some(display_name) = self.display_name.as_deref() {
      let length = display_name.chars().count();
      if display_name.trim().is_empty() || length > validation::DISPLAY_NAME_MAX {
        let mut error = ValidationError::new("length");
        error.message = Some(Cow::Borrowed("Invalid display name"));
        errors.add("display_name", error);
      }
    }

    // TODO: check for weak passwords
    if let Err(error) = validate_password(&self.password) {
      errors.add("password", error);
    }

    if self.password.as_str() != self.confirm_password.as_str() {
      let mut error = ValidationError::new("unmatched_password");
      error.message = Some(Cow::Borrowed("Unmatched password"));
      errors.add("confirm_password", error);
    }

    if errors.errors().is_empty() {
      Ok(())
    } else {
      Err(errors)
    }
  }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Response {
  pub id: Id<UserMarker>,
  pub name: String,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::form::tests::must_fail;

  fn form(password: &str, confirm_password: &str) -> Request {
    Request {
      username: "memothelemo".into(),
      display_name: None,
      password: password.into(),
      confirm_password: confirm_password.into(),
    }
  }

  #[test]
  fn test_password_fields() {
    static INVALID_PASSWORDS: &[&str] = &[
      "\thelloworld",
      "    hello",
      "world    ",
      "too_short",
      "we_dont_accept_tabs\t",
      concat!(
        "thisistoolongpleasedontactuallydothisathhomeotherwiseyoulldiefromtypingtoomuch",
        "imeanitdoyouknowaboutrsi?nope,ok.12345678901234567890"
      ),
    ];

    for combination in INVALID_PASSWORDS {
      must_fail(&form(combination, combination), format_args!("{combination:?}"));
    }

    let error = form("wrong_password", "wrong_password1").validate().unwrap_err();
    assert!(error.field_errors().contains_key("confirm_password"));
    assert!(form("wrong_password", "wrong_password").validate().is_ok());
  }

  #[test]
  fn test_username_and_display_name() {
    let mut request = form("wrong_password", "wrong_password");
    request.username = "me".into();
    must_fail(&request, format_args!("reserved username"));

    let mut request = form("wrong_password", "wrong_password");
    request.display_name = Some("  ".into());
    must_fail(&request, format_args!("blank display name"));

    request.display_name = Some("Memo".into());
    assert!(request.validate().is_ok());
  }
}
