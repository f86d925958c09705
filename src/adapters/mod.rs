//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `postgres` - Repositories over PostgreSQL
//! - `memory` - In-memory booking and user stores for tests and local runs
//! - `password` - bcrypt hashing for the user stores
//! - `session` - Visitor session stores (in-memory, Redis)
//! - `mail` - Outgoing mail queue
//! - `http` - axum routers

pub mod http;
pub mod mail;
pub mod memory;
pub mod password;
pub mod postgres;
pub mod session;

pub use mail::{spawn_mail_listener, ChannelMailer};
pub use memory::{InMemoryBookingStore, InMemoryUserStore};
pub use postgres::{
    PostgresReservationRepository, PostgresRestrictionRepository, PostgresRoomRepository,
    PostgresUserRepository,
};
pub use session::{InMemorySessionStore, RedisSessionStore};
