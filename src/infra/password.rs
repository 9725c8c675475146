//! Argon2id password hashing for admin accounts.

use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{PasswordHasher as _, SaltString},
};
use rand::RngCore;

use crate::{
    app_error::{AppError, AppResult},
    use_cases::admin_auth::PasswordHasher,
};

const SALT_LEN: usize = 16;

/// Argon2id with the default parameters; the all-zero digest matches no password.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Hashes to PHC strings with the default Argon2id parameters.
#[derive(Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> AppResult<String> {
        let mut salt_bytes = [0u8; SALT_LEN];
        rand::rngs::OsRng.fill_bytes(&mut salt_bytes);
        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|e| AppError::Internal(e.to_string()))?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    /// `Ok(false)` on mismatch; a malformed stored hash is an internal error.
    fn verify(&self, password: &str, password_hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| AppError::Internal(format!("invalid password hash: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::Internal(e.to_string())),
        }
    }

    fn dummy_hash(&self) -> &'static str {
        DUMMY_HASH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash("hunter2-hunter2").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("hunter2-hunter2", &hash).unwrap());
        assert!(!hasher.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn salts_differ() {
        let hasher = Argon2PasswordHasher;
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn dummy_hash_is_valid_and_never_matches() {
        let hasher = Argon2PasswordHasher;
        let parsed = PasswordHash::new(hasher.dummy_hash()).unwrap();
        assert_eq!(parsed.algorithm.as_str(), "argon2id");
        assert!(!hasher.verify("", hasher.dummy_hash()).unwrap());
        assert!(!hasher.verify("hunter2-hunter2", hasher.dummy_hash()).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let result = Argon2PasswordHasher.verify("pw", "not-a-phc-string");
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
