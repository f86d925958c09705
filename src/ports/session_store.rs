//! Session store port - per-visitor key/value state with a lifetime.
//!
//! Values cross the port as JSON so the trait stays object-safe;
//! [`SessionHandle`] adds the typed get/put used by handlers and turns a
//! missing or wrongly shaped value into an explicit [`SessionRead`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::foundation::SessionToken;

/// Errors that can occur in session store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    /// Backend communication error
    #[error("Session backend error: {0}")]
    Backend(String),

    /// Value could not be encoded for storage
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Storage for session values, scoped by visitor token.
///
/// Implementations expire a visitor's values once the configured lifetime
/// passes without a write.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, token: &SessionToken, key: &str) -> Result<Option<Value>, SessionStoreError>;

    /// Store `value` under `key`, refreshing the session lifetime.
    async fn put(&self, token: &SessionToken, key: &str, value: Value)
        -> Result<(), SessionStoreError>;

    /// Remove `key` and return what it held.
    async fn remove(&self, token: &SessionToken, key: &str)
        -> Result<Option<Value>, SessionStoreError>;

    /// Drop every value for the visitor.
    async fn destroy(&self, token: &SessionToken) -> Result<(), SessionStoreError>;
}

/// Result of a typed session read.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionRead<T> {
    /// Nothing stored under the key.
    Absent,
    /// Something is stored but does not decode as `T`.
    Malformed(String),
    Present(T),
}

impl<T> SessionRead<T> {
    /// The value, treating absent and malformed alike.
    pub fn present(self) -> Option<T> {
        match self {
            SessionRead::Present(value) => Some(value),
            SessionRead::Absent | SessionRead::Malformed(_) => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, SessionRead::Present(_))
    }
}

/// One visitor's view of the session store.
#[derive(Clone)]
pub struct SessionHandle {
    store: Arc<dyn SessionStore>,
    token: SessionToken,
}

impl SessionHandle {
    pub fn new(store: Arc<dyn SessionStore>, token: SessionToken) -> Self {
        Self { store, token }
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<SessionRead<T>, SessionStoreError> {
        let Some(raw) = self.store.get(&self.token, key).await? else {
            return Ok(SessionRead::Absent);
        };
        match serde_json::from_value(raw) {
            Ok(value) => Ok(SessionRead::Present(value)),
            Err(e) => {
                tracing::debug!(key, error = %e, "Session value has unexpected shape");
                Ok(SessionRead::Malformed(e.to_string()))
            }
        }
    }

    pub async fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), SessionStoreError> {
        let raw = serde_json::to_value(value)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;
        self.store.put(&self.token, key, raw).await
    }

    pub async fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        self.store.remove(&self.token, key).await.map(|_| ())
    }

    /// Drops everything stored for this visitor.
    pub async fn destroy(&self) -> Result<(), SessionStoreError> {
        self.store.destroy(&self.token).await
    }

    /// Read-once string, for flash messages.
    pub async fn pop_string(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        let value = self.store.remove(&self.token, key).await?;
        Ok(value.and_then(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        }))
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}
