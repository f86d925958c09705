//! Availability query handlers.

mod check_room_availability;
mod list_rooms;
mod search_availability;

pub use check_room_availability::{
    AvailabilityCheck, CheckRoomAvailabilityHandler, CheckRoomAvailabilityQuery,
};
pub use list_rooms::ListRoomsHandler;
pub use search_availability::{SearchAvailabilityHandler, SearchAvailabilityQuery, SearchOutcome};
