use sha2::Digest;

const SALT_CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const SALT_LENGTH: usize = 16;

fn digest(salt: &str, password: &str) -> String {
  let mut hasher = sha2::Sha512::default();
  hasher.update(format!("{salt}:{password}"));
  hex::encode(hasher.finalize())
}

/// Hashes a password with a freshly generated salt.
///
/// The output is stored as `salt$hash`.
#[must_use]
pub fn hash(password: &str) -> String {
  let salt = random_string::generate(SALT_LENGTH, SALT_CHARSET);
  let hash = digest(&salt, password);
  format!("{salt}${hash}")
}

/// Checks the password against a `salt$hash` string produced by [`hash`].
#[must_use]
pub fn verify(password: &str, stored: &str) -> bool {
  let Some((salt, expected)) = stored.split_once('$') else {
    return false;
  };

  let attempt = digest(salt, password);
  if attempt.len() != expected.len() {
    return false;
  }

  // constant-time comparison
  let mut matched = true;
  for (a, b) in attempt.bytes().zip(expected.bytes()) {
    matched &= a == b;
  }
  matched
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_hash_and_verify() {
    let stored = hash("correct_horse_battery");
    assert!(verify("correct_horse_battery", &stored));
    assert!(!verify("correct_horse_batterx", &stored));
  }

  #[test]
  fn test_salts_differ() {
    assert_ne!(hash("same_password_here"), hash("same_password_here"));
  }

  #[test]
  fn test_rejects_malformed() {
    assert!(!verify("anything", "no_dollar_sign"));
    assert!(!verify("anything", "salt$short"));
  }
}
