use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;
use thiserror::Error;

/// Verified against when an email has no account, so unknown emails cost the
/// same Argon2 work as wrong passwords.
static DECOY_HASH: Lazy<String> = Lazy::new(|| hash_password("museum-api-decoy").unwrap_or_default());

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("Password worker failed: {0}")]
    Worker(String),
}

/// Argon2id PHC string with a fresh random salt
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Ok(false) on mismatch; Err only when the stored hash cannot be parsed
pub fn verify_password(plain: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;
    Ok(Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok())
}

/// `hash_password` on the blocking pool
pub async fn hash_password_blocking(plain: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .map_err(|e| PasswordError::Worker(e.to_string()))?
}

/// Check `plain` against the stored hash on the blocking pool. With no stored
/// hash the decoy is verified instead and the result is always Ok(false).
pub async fn check_password(plain: String, stored_hash: Option<String>) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => verify_password(&plain, &hash),
        None => {
            let _ = verify_password(&plain, &DECOY_HASH);
            Ok(false)
        }
    })
    .await
    .map_err(|e| PasswordError::Worker(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_only_the_original_password() {
        let hash = hash_password("pw123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("pw123", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
        assert!(!verify_password("pw1234", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("pw123").unwrap();
        let b = hash_password("pw123").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("pw123", &b).unwrap());
    }

    #[test]
    fn plaintext_in_the_hash_column_is_an_error() {
        assert!(matches!(verify_password("pw123", "pw123"), Err(PasswordError::MalformedHash(_))));
    }

    #[test]
    fn decoy_is_a_real_argon2id_hash() {
        assert!(DECOY_HASH.starts_with("$argon2id$"));
        assert!(PasswordHash::new(&DECOY_HASH).is_ok());
        assert!(!verify_password("pw123", &DECOY_HASH).unwrap());
    }

    #[tokio::test]
    async fn missing_hash_never_matches() {
        assert!(!check_password("pw123".into(), None).await.unwrap());
        assert!(!check_password("museum-api-decoy".into(), None).await.unwrap());

        let hash = hash_password_blocking("pw123".into()).await.unwrap();
        assert!(check_password("pw123".into(), Some(hash.clone())).await.unwrap());
        assert!(!check_password("wrong".into(), Some(hash)).await.unwrap());
    }
}
