//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `RoomRepository` - Rooms and availability searches
//! - `ReservationRepository` - Reservation persistence and admin queries
//! - `RestrictionRepository` - Date-range locks and owner blocks
//! - `UserRepository` - Staff accounts and credential checks
//!
//! ## Collaborator Ports
//!
//! - `SessionStore` - Per-visitor key/value state
//! - `Mailer` - Fire-and-forget outbound mail

mod mailer;
mod reservation_repository;
mod restriction_repository;
mod room_repository;
mod session_store;
mod user_repository;

pub use mailer::{MailData, MailError, Mailer};
pub use reservation_repository::ReservationRepository;
pub use restriction_repository::RestrictionRepository;
pub use room_repository::RoomRepository;
pub use session_store::{SessionHandle, SessionRead, SessionStore, SessionStoreError};
pub use user_repository::UserRepository;
