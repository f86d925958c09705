//! User repository port.
//!
//! Credential checks happen inside the store so password hashes never
//! cross the port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// Repository port for staff accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Checks `password` against the stored hash for `email`.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` for an unknown email or a wrong password
    /// - `DatabaseError` / `Timeout` on store failure
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserId, DomainError>;

    /// # Errors
    ///
    /// - `UserNotFound` if no such user exists
    async fn get_user_by_id(&self, id: UserId) -> Result<User, DomainError>;

    /// Overwrites name, email and access level, and bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if no such user exists
    async fn update_user(&self, user: &User) -> Result<(), DomainError>;
}
