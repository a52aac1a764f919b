use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;
use thiserror::Error;

/// One-way password hashing (Argon2id, PHC string format).
pub struct PasswordHasher;

/// Error type for password operations.
///
/// A wrong password is not an error: `verify` reports it as `Ok(false)`.
/// Errors mean the operation itself failed, e.g. a stored digest that is
/// not a parseable PHC string.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password digest is malformed: {0}")]
    MalformedDigest(String),
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// Accepts any string, including the empty string; the digest embeds the
    /// algorithm, parameters, and salt.
    ///
    /// # Errors
    /// * `HashingFailed` - The underlying hash computation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|digest| digest.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored digest.
    ///
    /// # Returns
    /// `true` iff the password hashes to the digest under the digest's own
    /// parameters; `false` for any mismatch.
    ///
    /// # Errors
    /// * `MalformedDigest` - The stored digest is not a valid PHC string
    pub fn verify(&self, password: &str, digest: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(digest)
            .map_err(|e| PasswordError::MalformedDigest(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = PasswordHasher::new();

        let digest = hasher.hash("junaid").expect("Failed to hash password");
        assert!(digest.starts_with("$argon2"));

        assert!(hasher.verify("junaid", &digest).unwrap());
        assert!(!hasher.verify("wrong", &digest).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("password123").unwrap();
        let second = hasher.hash("password123").unwrap();

        // Fresh salt each time
        assert_ne!(first, second);
        assert!(hasher.verify("password123", &first).unwrap());
        assert!(hasher.verify("password123", &second).unwrap());
    }

    #[test]
    fn test_empty_password_is_hashable() {
        let hasher = PasswordHasher::new();

        let digest = hasher.hash("").expect("Failed to hash empty password");
        assert!(hasher.verify("", &digest).unwrap());
        assert!(!hasher.verify("x", &digest).unwrap());
    }

    #[test]
    fn test_malformed_digest_is_an_error() {
        let hasher = PasswordHasher::new();

        let result = hasher.verify("password", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::MalformedDigest(_))));
    }
}
