use bcrypt::{hash, verify};

use acme_store_shared::constants::BCRYPT_COST;

use crate::error::AppError;

/// Hash a password using bcrypt.
///
/// Cost 12 puts a single hash in the low hundreds of milliseconds.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, BCRYPT_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against its stored bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let password = "TestPassword123!";
        let hash = hash_password(password).expect("Failed to hash password");

        assert!(verify_password(password, &hash).expect("Failed to verify password"));
        assert!(!verify_password("wrong_password", &hash).expect("Failed to verify password"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same-password").expect("Failed to hash password");
        let second = hash_password("same-password").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(verify_password("same-password", &second).expect("Failed to verify password"));
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }
}
