//! ListRoomsHandler - the room catalogue.

use std::sync::Arc;

use crate::domain::reservation::{ReservationError, Room};
use crate::ports::RoomRepository;

pub struct ListRoomsHandler {
    rooms: Arc<dyn RoomRepository>,
}

impl ListRoomsHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn handle(&self) -> Result<Vec<Room>, ReservationError> {
        Ok(self.rooms.all_rooms().await?)
    }
}
