use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::models::RoomModel;
use crate::shared::AppError;

/// Trait for room repository operations
#[async_trait]
pub trait RoomRepository {
    async fn create_room(&self, room: &RoomModel) -> Result<(), AppError>;
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError>;
    async fn list_rooms(&self) -> Result<Vec<RoomModel>, AppError>;

    /// Atomically record an admitted participant on a room
    async fn add_member(&self, room_id: &str, guest_id: &str) -> Result<(), AppError>;
}

/// In-memory implementation of RoomRepository
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<String, RoomModel>>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    #[instrument(skip(self, room))]
    async fn create_room(&self, room: &RoomModel) -> Result<(), AppError> {
        debug!(room_id = %room.id, host_name = %room.host_name, "Creating room in memory");

        let mut rooms = self.rooms.lock().unwrap();
        if rooms.contains_key(&room.id) {
            warn!(room_id = %room.id, "Room already exists in memory");
            return Err(AppError::Conflict("Room already exists".to_string()));
        }
        rooms.insert(room.id.clone(), room.clone());

        debug!(room_id = %room.id, "Room created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        debug!(room_id = %room_id, "Fetching room from memory");

        let rooms = self.rooms.lock().unwrap();
        let room = rooms.get(room_id).cloned();

        match &room {
            Some(r) => {
                debug!(room_id = %room_id, host_name = %r.host_name, "Room found in memory")
            }
            None => debug!(room_id = %room_id, "Room not found in memory"),
        }

        Ok(room)
    }

    #[instrument(skip(self))]
    async fn list_rooms(&self) -> Result<Vec<RoomModel>, AppError> {
        debug!("Listing all rooms in memory");

        let rooms = self.rooms.lock().unwrap();
        let room_list = rooms.values().cloned().collect();

        Ok(room_list)
    }

    #[instrument(skip(self))]
    async fn add_member(&self, room_id: &str, guest_id: &str) -> Result<(), AppError> {
        debug!(room_id = %room_id, guest_id = %guest_id, "Adding member to room");

        let mut rooms = self.rooms.lock().unwrap();
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;

        room.add_member(guest_id.to_string());

        info!(
            room_id = %room_id,
            guest_id = %guest_id,
            member_count = room.member_count(),
            "Member added to room"
        );
        Ok(())
    }
}
