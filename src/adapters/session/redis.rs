//! Redis-backed session store for multi-server deployments.
//!
//! Each visitor is one hash at `<prefix>:<token>`; fields are session keys
//! and values are JSON text. Every write refreshes the hash's EXPIRE.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde_json::Value;

use crate::domain::foundation::SessionToken;
use crate::ports::{SessionStore, SessionStoreError};

#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
    key_prefix: String,
    lifetime_secs: u64,
}

impl RedisSessionStore {
    pub fn new(conn: MultiplexedConnection, key_prefix: impl Into<String>, lifetime_secs: u64) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
            lifetime_secs,
        }
    }

    fn key(&self, token: &SessionToken) -> String {
        hash_key(&self.key_prefix, token)
    }
}

fn hash_key(prefix: &str, token: &SessionToken) -> String {
    format!("{}:{}", prefix, token)
}

fn backend(e: redis::RedisError) -> SessionStoreError {
    SessionStoreError::Backend(e.to_string())
}

fn decode(raw: Option<String>) -> Result<Option<Value>, SessionStoreError> {
    raw.map(|text| {
        serde_json::from_str(&text).map_err(|e| SessionStoreError::Serialization(e.to_string()))
    })
    .transpose()
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, token: &SessionToken, key: &str) -> Result<Option<Value>, SessionStoreError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.hget(self.key(token), key).await.map_err(backend)?;
        decode(raw)
    }

    async fn put(&self, token: &SessionToken, key: &str, value: Value) -> Result<(), SessionStoreError> {
        let text = serde_json::to_string(&value)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;
        let hash = self.key(token);
        let mut conn = self.conn.clone();

        redis::pipe()
            .atomic()
            .hset(&hash, key, text)
            .ignore()
            .expire(&hash, self.lifetime_secs as i64)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(backend)
    }

    async fn remove(&self, token: &SessionToken, key: &str) -> Result<Option<Value>, SessionStoreError> {
        let hash = self.key(token);
        let mut conn = self.conn.clone();

        let (raw,): (Option<String>,) = redis::pipe()
            .atomic()
            .hget(&hash, key)
            .hdel(&hash, key)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(backend)?;
        decode(raw)
    }

    async fn destroy(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.key(token)).await.map_err(backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_by_prefix_and_token() {
        let token = SessionToken::new();
        assert_eq!(hash_key("session", &token), format!("session:{}", token));
        assert_ne!(hash_key("staging", &token), hash_key("session", &token));
    }

    #[test]
    fn decode_rejects_non_json_text() {
        let err = decode(Some("not json".to_string())).unwrap_err();
        assert!(matches!(err, SessionStoreError::Serialization(_)));
    }

    #[test]
    fn decode_passes_through_absent_values() {
        assert_eq!(decode(None).unwrap(), None);
    }

    // Round-trip tests need a running Redis instance and live outside the
    // unit suite.
}
