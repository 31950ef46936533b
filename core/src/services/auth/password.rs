//! Password credential hashing and policy

use ak_shared::config::auth::BCRYPT_MAX_PASSWORD_BYTES;
use ak_shared::PasswordConfig;

use crate::errors::{DomainError, DomainResult, ValidationError};

/// Check the password's UTF-8 length against the configured bounds
///
/// The upper bound never exceeds what bcrypt reads, so two passwords that
/// pass this check always hash differently.
pub fn validate_password(password: &str, policy: &PasswordConfig) -> Result<(), ValidationError> {
    let max_bytes = policy.max_length.min(BCRYPT_MAX_PASSWORD_BYTES);
    let length = password.len();
    if length < policy.min_length || length > max_bytes {
        return Err(ValidationError::InvalidPassword {
            min_bytes: policy.min_length,
            max_bytes,
        });
    }
    Ok(())
}

/// Hash a password with bcrypt on the blocking pool
pub async fn hash_password(password: String, cost: u32) -> DomainResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::internal(format!("password hashing task failed: {}", e)))?
        .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
}

/// Check a password against a stored bcrypt hash on the blocking pool
pub async fn verify_password(password: String, hash: String) -> DomainResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| DomainError::internal(format!("password verification task failed: {}", e)))?
        .map_err(|e| DomainError::internal(format!("password verification failed: {}", e)))
}
