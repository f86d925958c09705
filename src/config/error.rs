//! Configuration error types

use thiserror::Error;

/// The environment could not be read into an [`super::AppConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// A loaded value is out of range or malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingRequired(&'static str),

    #[error("Server port must be non-zero")]
    InvalidPort,

    #[error("Request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("Cannot listen on {0}: host must be an IP address")]
    InvalidListenAddress(String),

    #[error("Database URL must use the postgres:// scheme")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Statement timeout must be between 1 and 60 seconds")]
    InvalidStatementTimeout,

    #[error("Redis URL must use the redis:// or rediss:// scheme")]
    InvalidRedisUrl,

    #[error("Redis key prefix must be a non-empty word")]
    InvalidRedisKeyPrefix,

    #[error("Session lifetime must be positive")]
    InvalidSessionLifetime,

    #[error("Invalid session cookie name")]
    InvalidCookieName,

    #[error("{0} is not an email address")]
    InvalidEmailAddress(&'static str),
}
