//! Room reference data.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{RoomId, Timestamp};

/// A bookable room. Immutable for the duration of a booking flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub room_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Room {
    /// Creates a room with fresh audit timestamps.
    pub fn new(id: RoomId, room_name: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            room_name: room_name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
