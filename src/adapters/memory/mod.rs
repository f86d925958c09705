//! In-memory repository adapters.

mod booking_store;
mod user_store;

pub use booking_store::InMemoryBookingStore;
pub use user_store::InMemoryUserStore;
