use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use validator::ValidationError;

pub const USERNAME_MAX: usize = 30;
pub const DISPLAY_NAME_MAX: usize = 64;
pub const PASSWORD_MIN: usize = 12;
pub const PASSWORD_MAX: usize = 128;

pub const COMMUNITY_NAME_MAX: usize = 32;
pub const COMMUNITY_TITLE_MAX: usize = 64;

pub const POST_TEXT_MAX: usize = 5000;
pub const POST_COMMENT_TEXT_MAX: usize = 1500;
pub const REPORT_COMMENT_MAX: usize = 1000;
pub const REPORT_CATEGORY_NAME_MAX: usize = 32;

pub const COMMENTS_DEFAULT_LIMIT: u8 = 10;
pub const COMMENTS_MAX_LIMIT: u8 = 20;

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
  #[allow(clippy::unwrap_used)]
  Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9\.\-_]*[A-Za-z0-9]$").unwrap()
});

static COMMUNITY_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
  #[allow(clippy::unwrap_used)]
  Regex::new(r"^[a-z0-9_]+$").unwrap()
});

pub fn is_valid_username(name: &str) -> bool {
  USERNAME_REGEX.is_match(name) && name.len() <= USERNAME_MAX
}

pub fn is_valid_community_name(name: &str) -> bool {
  COMMUNITY_NAME_REGEX.is_match(name) && name.len() <= COMMUNITY_NAME_MAX
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
  let mut error = ValidationError::new(code);
  error.message = Some(Cow::Borrowed(message));
  error
}

/// Rejects text that is made entirely of whitespace.
pub fn not_blank(text: &str) -> Result<(), ValidationError> {
  if text.trim().is_empty() {
    Err(error("blank", "This field must not be blank"))
  } else {
    Ok(())
  }
}

/// `me` is reserved since `/users/@me` points to the current user.
pub const RESERVED_USERNAMES: &[&str] = &["me"];

pub fn validate_username(name: &str) -> Result<(), ValidationError> {
  if RESERVED_USERNAMES.contains(&name) {
    Err(error("reserved_username", "This username is reserved"))
  } else if is_valid_username(name) {
    Ok(())
  } else {
    Err(error("invalid_username", "Invalid username"))
  }
}

pub fn validate_community_name(name: &str) -> Result<(), ValidationError> {
  if is_valid_community_name(name) {
    Ok(())
  } else {
    Err(error("invalid_community_name", "Invalid community name"))
  }
}

/// All passwords must have no trailing or leading whitespaces.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
  if password.trim().len() != password.len() {
    Err(error(
      "untrimmed_password",
      "Passwords must not have starting or ending with spaces",
    ))
  } else if password.len() > PASSWORD_MAX {
    Err(error("password_too_long", "Passwords must not be too big"))
  } else if password.len() < PASSWORD_MIN {
    Err(error("password_too_short", "Passwords must not be too short"))
  } else {
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_is_valid_username() {
    assert!(is_valid_username("memothelemo"));
    assert!(is_valid_username("mark.robes"));
    assert!(is_valid_username("salmon-ella"));
    assert!(is_valid_username("crossword_puzzle"));
    assert!(is_valid_username("2pac"));
    assert!(is_valid_username("_apple"));

    assert!(!is_valid_username("overlover_underscore_"));
    assert!(!is_valid_username("pretty ugly"));
  }

  #[test]
  fn test_is_valid_community_name() {
    assert!(is_valid_community_name("rust"));
    assert!(is_valid_community_name("cats_of_agora"));

    assert!(!is_valid_community_name(""));
    assert!(!is_valid_community_name("Rust"));
    assert!(!is_valid_community_name("no spaces"));
    assert!(!is_valid_community_name(&"a".repeat(COMMUNITY_NAME_MAX + 1)));
  }

  #[test]
  fn test_validate_username() {
    assert!(validate_username("memothelemo").is_ok());
    assert_eq!(validate_username("me").unwrap_err().code, "reserved_username");
    assert_eq!(validate_username("no way").unwrap_err().code, "invalid_username");
  }

  #[test]
  fn test_not_blank() {
    assert!(not_blank("hello").is_ok());
    assert!(not_blank("").is_err());
    assert!(not_blank(" \t\n").is_err());
  }

  #[test]
  fn test_validate_password() {
    static INVALID_PASSWORDS: &[&str] = &[
      "\thelloworld",
      "    hello",
      "world    ",
      "too_short",
      "we_dont_accept_tabs\t",
    ];

    for password in INVALID_PASSWORDS {
      assert!(
        validate_password(password).is_err(),
        "expected to fail but passed (entry = {password:?})"
      );
    }
    assert!(validate_password(&"a".repeat(PASSWORD_MAX + 1)).is_err());
    assert!(validate_password("correct_horse_battery").is_ok());
  }
}
