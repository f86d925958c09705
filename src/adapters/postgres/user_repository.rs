//! PostgreSQL implementation of UserRepository.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::adapters::password::{invalid_credentials, verify_password};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

use super::deadline::{bounded, column};

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserId, DomainError> {
        let row: Option<(i32, String)> = bounded(
            self.statement_timeout,
            "authenticate",
            sqlx::query_as("SELECT id, password FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool),
        )
        .await?;

        let Some((id, hash)) = row else {
            tracing::info!("Login attempt for unknown email");
            return Err(invalid_credentials());
        };
        if !verify_password(password, &hash).await? {
            tracing::info!(user_id = id, "Login attempt with wrong password");
            return Err(invalid_credentials());
        }
        Ok(UserId::new(id))
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<User, DomainError> {
        let row = bounded(
            self.statement_timeout,
            "get_user_by_id",
            sqlx::query(
                r#"
                SELECT id, first_name, last_name, email, access_level, created_at, updated_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(id.as_i32())
            .fetch_optional(&self.pool),
        )
        .await?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(user_not_found(id)),
        }
    }

    async fn update_user(&self, user: &User) -> Result<(), DomainError> {
        let result = bounded(
            self.statement_timeout,
            "update_user",
            sqlx::query(
                r#"
                UPDATE users
                SET first_name = $1, last_name = $2, email = $3, access_level = $4,
                    updated_at = NOW()
                WHERE id = $5
                "#,
            )
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(user.access_level)
            .bind(user.id.as_i32())
            .execute(&self.pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user.id));
        }
        Ok(())
    }
}

fn user_not_found(id: UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", id))
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let id: i32 = column(row, "id")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;
    let updated_at: DateTime<Utc> = column(row, "updated_at")?;

    Ok(User {
        id: UserId::new(id),
        first_name: column(row, "first_name")?,
        last_name: column(row, "last_name")?,
        email: column(row, "email")?,
        access_level: column(row, "access_level")?,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postgres_user_repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresUserRepository>();
    }
}
