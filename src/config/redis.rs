//! Redis connection for the shared session backend

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Only read when `session.backend = redis`.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    /// `redis://` or `rediss://` URL
    #[serde(default)]
    pub url: String,

    /// Deadline for the initial connection, in seconds
    #[serde(default = "default_connect_timeout")]
    pub timeout_secs: u64,

    /// Namespace for session hashes, so several deployments can share a
    /// Redis database
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl RedisConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let scheme_ok = ["redis://", "rediss://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme));
        match (self.url.is_empty(), scheme_ok) {
            (true, _) => Err(ValidationError::MissingRequired("REDIS_URL")),
            (false, false) => Err(ValidationError::InvalidRedisUrl),
            _ if self.key_prefix.is_empty() || self.key_prefix.contains(char::is_whitespace) => {
                Err(ValidationError::InvalidRedisKeyPrefix)
            }
            _ => Ok(()),
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: default_connect_timeout(),
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_key_prefix() -> String {
    "session".to_string()
}
