use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::ops::Deref;

/// Keeps the raw sensitive data in memory but it cannot be
/// accidentally leaked through the console or logs.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
  #[must_use]
  pub const fn new(value: T) -> Self {
    Self(value)
  }

  #[must_use]
  pub fn into_inner(self) -> T {
    self.0
  }
}

impl<T> Debug for Sensitive<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("<hidden>").finish()
  }
}

impl<T> Display for Sensitive<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("<hidden>").finish()
  }
}

impl<T> Deref for Sensitive<T> {
  type Target = T;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl<T: AsRef<str>> Sensitive<T> {
  #[must_use]
  pub fn as_str(&self) -> &str {
    self.0.as_ref()
  }
}

impl<T> From<T> for Sensitive<T> {
  fn from(value: T) -> Self {
    Self(value)
  }
}

impl From<&str> for Sensitive<String> {
  fn from(value: &str) -> Self {
    Self(value.to_string())
  }
}
