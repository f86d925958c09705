//! Reservation domain: rooms, reservations, restrictions, and the
//! booking draft that accumulates across requests.

mod aggregate;
mod draft;
mod errors;
mod guest;
mod restriction;
mod room;

pub use aggregate::{NewReservation, Reservation};
pub use draft::{DraftState, ReservationDraft, DRAFT_SESSION_KEY};
pub use errors::{DraftError, ReservationError};
pub use guest::{
    is_valid_email, BookingRequest, FormErrors, GuestDetails, GuestForm, FIRST_NAME_MIN_LEN,
};
pub use restriction::{NewRoomRestriction, RestrictionKind, RoomRestriction};
pub use room::Room;
