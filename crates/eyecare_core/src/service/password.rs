//! Argon2id password hashing.

use crate::repo::{RepoError, RepoResult};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hashes `password` into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> RepoResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| RepoError::Credential(format!("failed to hash password: {err}")))
}

/// Checks `password` against a stored PHC hash string.
///
/// # Errors
/// - The stored hash cannot be parsed.
pub fn verify_password(password: &str, stored_hash: &str) -> RepoResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|err| RepoError::Credential(format!("stored password hash is invalid: {err}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::{hash_password, verify_password};
    use crate::repo::RepoError;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let first = hash_password("correct horse").unwrap();
        let second = hash_password("correct horse").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        let err = verify_password("correct horse", "plaintext").unwrap_err();
        assert!(matches!(err, RepoError::Credential(_)));
    }
}
