//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresRoomRepository` - Rooms and availability searches
//! - `PostgresReservationRepository` - Reservations and admin queries
//! - `PostgresRestrictionRepository` - Reservation locks and owner blocks
//! - `PostgresUserRepository` - Staff accounts and bcrypt credential checks
//!
//! Every statement runs under the configured statement timeout.

mod deadline;
mod reservation_repository;
mod restriction_repository;
mod room_repository;
mod user_repository;

pub use reservation_repository::PostgresReservationRepository;
pub use restriction_repository::PostgresRestrictionRepository;
pub use room_repository::PostgresRoomRepository;
pub use user_repository::PostgresUserRepository;
