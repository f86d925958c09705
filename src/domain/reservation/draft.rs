//! Reservation draft carried across the multi-step booking flow.
//!
//! ```text
//! (none) ──search──▶ RangeSelected ──choose room──▶ RoomChosen
//!                                                       │ details valid
//!                                                       ▼
//!                         Committed ◀──persisted── DetailsFilled
//! ```
//!
//! A direct booking link skips straight to `RoomChosen`. Removing the
//! draft from the session abandons it from any state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{format_date, RoomId, StayDates};

use super::{DraftError, GuestDetails, GuestForm, Reservation, Room};

/// Session key the draft is stored under.
pub const DRAFT_SESSION_KEY: &str = "reservation";

/// Name of a draft state, for errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftState {
    RangeSelected,
    RoomChosen,
    DetailsFilled,
    Committed,
}

impl fmt::Display for DraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DraftState::RangeSelected => "range_selected",
            DraftState::RoomChosen => "room_chosen",
            DraftState::DetailsFilled => "details_filled",
            DraftState::Committed => "committed",
        };
        write!(f, "{}", s)
    }
}

/// In-progress booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReservationDraft {
    RangeSelected {
        stay: StayDates,
    },
    RoomChosen {
        stay: StayDates,
        room_id: RoomId,
        room: Option<Room>,
    },
    DetailsFilled {
        stay: StayDates,
        room: Room,
        guest: GuestDetails,
    },
    Committed {
        reservation: Reservation,
    },
}

impl ReservationDraft {
    /// Starts a draft from a successful availability search.
    pub fn select_range(stay: StayDates) -> Self {
        ReservationDraft::RangeSelected { stay }
    }

    /// Starts a draft from a direct booking link with the room already known.
    pub fn for_room(room: Room, stay: StayDates) -> Self {
        ReservationDraft::RoomChosen {
            stay,
            room_id: room.id,
            room: Some(room),
        }
    }

    pub fn state(&self) -> DraftState {
        match self {
            ReservationDraft::RangeSelected { .. } => DraftState::RangeSelected,
            ReservationDraft::RoomChosen { .. } => DraftState::RoomChosen,
            ReservationDraft::DetailsFilled { .. } => DraftState::DetailsFilled,
            ReservationDraft::Committed { .. } => DraftState::Committed,
        }
    }

    pub fn stay(&self) -> StayDates {
        match self {
            ReservationDraft::RangeSelected { stay }
            | ReservationDraft::RoomChosen { stay, .. }
            | ReservationDraft::DetailsFilled { stay, .. } => *stay,
            ReservationDraft::Committed { reservation } => reservation.stay,
        }
    }

    pub fn room_id(&self) -> Option<RoomId> {
        match self {
            ReservationDraft::RangeSelected { .. } => None,
            ReservationDraft::RoomChosen { room_id, .. } => Some(*room_id),
            ReservationDraft::DetailsFilled { room, .. } => Some(room.id),
            ReservationDraft::Committed { reservation } => Some(reservation.room_id),
        }
    }

    pub fn room(&self) -> Option<&Room> {
        match self {
            ReservationDraft::RoomChosen { room, .. } => room.as_ref(),
            ReservationDraft::DetailsFilled { room, .. } => Some(room),
            ReservationDraft::Committed { reservation } => reservation.room.as_ref(),
            ReservationDraft::RangeSelected { .. } => None,
        }
    }

    /// Selects (or re-selects) a room for the chosen dates.
    pub fn choose_room(self, room_id: RoomId) -> Result<Self, DraftError> {
        match self {
            ReservationDraft::RangeSelected { stay } | ReservationDraft::RoomChosen { stay, .. } => {
                Ok(ReservationDraft::RoomChosen {
                    stay,
                    room_id,
                    room: None,
                })
            }
            other => Err(DraftError::invalid_transition(other.state(), "choose_room")),
        }
    }

    /// Attaches the looked-up room to a draft that has chosen it.
    pub fn attach_room(self, room: Room) -> Result<Self, DraftError> {
        match self {
            ReservationDraft::RoomChosen { stay, room_id, .. } if room_id == room.id => {
                Ok(ReservationDraft::RoomChosen {
                    stay,
                    room_id,
                    room: Some(room),
                })
            }
            ReservationDraft::RoomChosen { room_id, .. } => Err(DraftError::RoomMismatch {
                expected: room_id,
                actual: room.id,
            }),
            other => Err(DraftError::invalid_transition(other.state(), "attach_room")),
        }
    }

    /// Records validated guest details against the resolved room.
    pub fn fill_details(
        self,
        stay: StayDates,
        room: Room,
        guest: GuestDetails,
    ) -> Result<Self, DraftError> {
        match self {
            ReservationDraft::RoomChosen { .. } | ReservationDraft::DetailsFilled { .. } => {
                Ok(ReservationDraft::DetailsFilled { stay, room, guest })
            }
            other => Err(DraftError::invalid_transition(other.state(), "fill_details")),
        }
    }

    /// Marks the draft as durably committed.
    pub fn commit(self, mut reservation: Reservation) -> Result<Self, DraftError> {
        match self {
            ReservationDraft::DetailsFilled { room, .. } => {
                reservation.room = Some(room);
                Ok(ReservationDraft::Committed { reservation })
            }
            other => Err(DraftError::invalid_transition(other.state(), "commit")),
        }
    }

    /// The committed reservation, if the draft reached its terminal state.
    pub fn committed(&self) -> Option<&Reservation> {
        match self {
            ReservationDraft::Committed { reservation } => Some(reservation),
            _ => None,
        }
    }

    /// Prefills the hidden booking fields of the guest form.
    pub fn form_defaults(&self) -> GuestForm {
        let stay = self.stay();
        GuestForm {
            start_date: format_date(stay.start()),
            end_date: format_date(stay.end()),
            room_id: self.room_id().map(|id| id.to_string()).unwrap_or_default(),
            ..GuestForm::default()
        }
    }
}
