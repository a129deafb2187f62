//! Argon2id password hashing for stored user records.
//!
//! Hashes use a random OsRng salt and default Argon2id parameters, stored
//! in PHC string format.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::AuthError;

/// Hash a plaintext password for storage.
///
/// # Errors
///
/// Returns [`AuthError::Hashing`] if hashing fails (rare).
pub fn hash(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC hash.
///
/// `Ok(false)` means the password does not match; `Err` only means the
/// stored hash is malformed.
pub fn verify(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_uses_argon2id_phc_format() {
        let hashed = hash("correct horse battery staple").unwrap();
        assert!(hashed.starts_with("$argon2id$"));
    }

    #[test]
    fn correct_password_verifies() {
        let hashed = hash("hunter2hunter2").unwrap();
        assert!(verify("hunter2hunter2", &hashed).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hashed = hash("hunter2hunter2").unwrap();
        assert!(!verify("hunter3hunter3", &hashed).unwrap());
    }

    #[test]
    fn same_password_hashes_differently_per_salt() {
        let a = hash("hunter2hunter2").unwrap();
        let b = hash("hunter2hunter2").unwrap();
        assert_ne!(a, b);
        assert!(verify("hunter2hunter2", &a).unwrap());
        assert!(verify("hunter2hunter2", &b).unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(verify("anything", "not-a-phc-hash").is_err());
    }
}
