//! Per-statement deadline and row decoding shared by the Postgres adapters.

use std::future::Future;
use std::time::Duration;

use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Runs one store call, failing with `Timeout` once `limit` elapses.
///
/// Dropping the future on expiry cancels the in-flight statement.
pub(super) async fn bounded<T, F>(limit: Duration, operation: &str, call: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            tracing::error!(operation, error = %e, "Store call failed");
            Err(DomainError::database(&format!("Failed to {}", operation), e))
        }
        Err(_) => {
            tracing::warn!(
                operation,
                timeout_ms = limit.as_millis() as u64,
                "Store call exceeded deadline"
            );
            Err(DomainError::timeout(operation))
        }
    }
}

/// Reads one column, mapping decode failures to `DatabaseError`.
pub(super) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}
