//! In-memory session store for tests and single-server deployments.
//!
//! Expiry is checked on read; `purge_expired` drops stale visitors and is
//! run periodically by the binary.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::foundation::{SessionToken, Timestamp};
use crate::ports::{SessionStore, SessionStoreError};

#[derive(Debug, Clone)]
struct SessionEntry {
    values: HashMap<String, Value>,
    expires_at: Timestamp,
}

/// Session store backed by a process-local map.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, SessionEntry>>>,
    lifetime_secs: u64,
}

impl InMemorySessionStore {
    pub fn new(lifetime_secs: u64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            lifetime_secs,
        }
    }

    /// Drop every expired session, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.expires_at.has_passed());
        before - sessions.len()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(86_400)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, token: &SessionToken, key: &str) -> Result<Option<Value>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(token)
            .filter(|entry| !entry.expires_at.has_passed())
            .and_then(|entry| entry.values.get(key).cloned()))
    }

    async fn put(&self, token: &SessionToken, key: &str, value: Value) -> Result<(), SessionStoreError> {
        let expires_at = Timestamp::now().plus_secs(self.lifetime_secs);
        let mut sessions = self.sessions.write().await;
        let entry = sessions.entry(*token).or_insert_with(|| SessionEntry {
            values: HashMap::new(),
            expires_at,
        });
        if entry.expires_at.has_passed() {
            entry.values.clear();
        }
        entry.values.insert(key.to_string(), value);
        entry.expires_at = expires_at;
        Ok(())
    }

    async fn remove(&self, token: &SessionToken, key: &str) -> Result<Option<Value>, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions
            .get_mut(token)
            .filter(|entry| !entry.expires_at.has_passed())
            .and_then(|entry| entry.values.remove(key)))
    }

    async fn destroy(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}
