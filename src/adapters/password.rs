//! bcrypt hashing shared by the user stores.
//!
//! Hashing is CPU-bound, so both calls run on the blocking pool.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Hashes `password` at `cost`.
pub async fn hash_password(password: &str, cost: u32) -> Result<String, DomainError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::database("Password hashing task failed", e))?
        .map_err(|e| DomainError::database("Failed to hash password", e))
}

/// True when `password` matches `hash`. A hash that bcrypt cannot parse is
/// a store error, not a mismatch.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, DomainError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| DomainError::database("Password check task failed", e))?
        .map_err(|e| DomainError::database("Failed to verify password", e))
}

pub(crate) fn invalid_credentials() -> DomainError {
    DomainError::new(ErrorCode::InvalidCredentials, "Invalid login credentials")
}
