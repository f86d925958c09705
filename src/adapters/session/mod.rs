//! Session store adapters.
//!
//! - `InMemorySessionStore` - process-local, for tests and single-server
//! - `RedisSessionStore` - Redis hashes with EXPIRE, for production

mod in_memory;
mod redis;

pub use self::redis::RedisSessionStore;
pub use in_memory::InMemorySessionStore;
