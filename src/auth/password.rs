use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("argon2 hash_password error: {0}")]
    Hash(argon2::password_hash::Error),

    #[error("stored credential is not a valid PHC string: {0}")]
    StoredHash(argon2::password_hash::Error),
}

/// Salted Argon2id hash in PHC string form. The plaintext never leaves this call.
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            PasswordError::Hash(e)
        })?
        .to_string();
    Ok(hash)
}

/// `Ok(false)` is an ordinary mismatch. Only a corrupt stored hash is an error.
///
/// The digest comparison inside argon2 is constant time.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        PasswordError::StoredHash(e)
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

lazy_static! {
    static ref DUMMY_HASH: Option<String> = hash_password("chirpy-dummy-credential").ok();
}

/// Builds the dummy hash now so the first unknown-email login is not slower
/// than the rest.
pub fn prime_dummy_hash() {
    lazy_static::initialize(&DUMMY_HASH);
}

/// Burns the same Argon2 work as a real verification.
///
/// Login calls this when no account matches the email, so that path costs
/// as much as a wrong password.
pub fn verify_dummy(plain: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(plain, hash);
    }
}
