use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{models::RoomModel, repository::RoomRepository, types::RoomResponse};
use crate::shared::AppError;

/// Service for handling room business logic
pub struct RoomService {
    repository: Arc<dyn RoomRepository + Send + Sync>,
}

impl RoomService {
    pub fn new(repository: Arc<dyn RoomRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Creates a new room with a generated ID, hosted by the given participant
    #[instrument(skip(self))]
    pub async fn create_room(
        &self,
        host_id: String,
        host_name: String,
    ) -> Result<RoomResponse, AppError> {
        let room_model = RoomModel::new(host_id, host_name);
        debug!(room_id = %room_model.id, "Generated room ID");

        self.repository.create_room(&room_model).await?;

        let room_response = RoomResponse {
            id: room_model.id.clone(),
            host_name: room_model.host_name.clone(),
            status: room_model.status.clone(),
            member_count: room_model.member_count(),
        };

        info!(
            room_id = %room_response.id,
            host_name = %room_response.host_name,
            "Room created successfully"
        );

        Ok(room_response)
    }

    /// Gets room details as a response object for API endpoints
    #[instrument(skip(self))]
    pub async fn get_room_details(&self, room_id: &str) -> Result<RoomResponse, AppError> {
        let room = self
            .repository
            .get_room(room_id)
            .await?
            .ok_or(AppError::NotFound("Room not found".to_string()))?;

        Ok(RoomResponse {
            id: room.id.clone(),
            host_name: room.host_name.clone(),
            status: room.status.clone(),
            member_count: room.member_count(),
        })
    }

    /// Gets the full room model for internal use (channel handlers, etc.)
    #[instrument(skip(self))]
    pub async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        debug!(room_id = %room_id, "Getting room model");
        self.repository.get_room(room_id).await
    }

    /// Lists all available rooms
    #[instrument(skip(self))]
    pub async fn list_rooms(&self) -> Result<Vec<RoomResponse>, AppError> {
        debug!("Listing all rooms");

        let rooms = self.repository.list_rooms().await?;
        Ok(rooms
            .into_iter()
            .map(|room| RoomResponse {
                id: room.id.clone(),
                host_name: room.host_name.clone(),
                status: room.status.clone(),
                member_count: room.member_count(),
            })
            .collect())
    }

    /// Whether the given participant is the room's host
    #[instrument(skip(self))]
    pub async fn is_host(&self, room_id: &str, guest_id: &str) -> Result<bool, AppError> {
        let room = self
            .repository
            .get_room(room_id)
            .await?
            .ok_or(AppError::NotFound("Room not found".to_string()))?;
        Ok(room.is_host(guest_id))
    }

    /// Record an admitted participant as a room member
    #[instrument(skip(self))]
    pub async fn add_member(&self, room_id: &str, guest_id: &str) -> Result<(), AppError> {
        self.repository.add_member(room_id, guest_id).await
    }
}
