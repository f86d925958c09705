//! In-memory user store for tests and local development.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::adapters::password::{hash_password, invalid_credentials, verify_password};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

/// bcrypt's minimum cost; this store never holds real credentials.
const HASH_COST: u32 = 4;

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<BTreeMap<UserId, StoredUser>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an account with the next free id and returns it.
    pub async fn add_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId, DomainError> {
        let password_hash = hash_password(password, HASH_COST).await?;
        let mut users = self.users.write().await;
        let id = UserId::new(users.keys().last().map_or(1, |last| last.as_i32() + 1));
        let now = Timestamp::now();
        users.insert(
            id,
            StoredUser {
                user: User {
                    id,
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    email: email.to_string(),
                    access_level: 1,
                    created_at: now,
                    updated_at: now,
                },
                password_hash,
            },
        );
        Ok(id)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserId, DomainError> {
        let found = self
            .users
            .read()
            .await
            .values()
            .find(|stored| stored.user.email == email)
            .map(|stored| (stored.user.id, stored.password_hash.clone()));

        let Some((id, hash)) = found else {
            return Err(invalid_credentials());
        };
        if verify_password(password, &hash).await? {
            Ok(id)
        } else {
            Err(invalid_credentials())
        }
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<User, DomainError> {
        self.users
            .read()
            .await
            .get(&id)
            .map(|stored| stored.user.clone())
            .ok_or_else(|| user_not_found(id))
    }

    async fn update_user(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&user.id).ok_or_else(|| user_not_found(user.id))?;
        stored.user = User {
            created_at: stored.user.created_at,
            updated_at: Timestamp::now(),
            ..user.clone()
        };
        Ok(())
    }
}

fn user_not_found(id: UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", id))
}
