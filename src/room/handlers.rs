use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use tracing::{info, instrument, warn};

use super::types::RoomResponse;
use crate::shared::{AppError, AppState};

/// Pull the caller's bearer token out of the Authorization header
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| {
            warn!("Missing or malformed Authorization header");
            AppError::Unauthorized("Missing authentication token".to_string())
        })
}

/// HTTP handler for creating a new room
///
/// POST /rooms
/// The authenticated caller becomes the room's host, and admission handling
/// for the room starts immediately.
#[instrument(name = "create_room", skip(state, headers))]
pub async fn create_room(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RoomResponse>, AppError> {
    let token = bearer_token(&headers)?;
    let claims = state.session_service.validate_session(token).await?;

    info!(host_id = %claims.guest_id, "Creating new room");

    let room = state
        .room_service
        .create_room(claims.guest_id, claims.display_name)
        .await?;

    state.admission.activate(&room.id).await?;

    info!(
        room_id = %room.id,
        host_name = %room.host_name,
        "Room created successfully"
    );

    Ok(Json(room))
}

/// HTTP handler for listing all rooms
///
/// GET /rooms
#[instrument(name = "list_rooms", skip(state))]
pub async fn list_rooms(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoomResponse>>, AppError> {
    let rooms = state.room_service.list_rooms().await?;

    info!(room_count = rooms.len(), "Rooms listed successfully");

    Ok(Json(rooms))
}

/// HTTP handler for fetching one room
///
/// GET /rooms/{room_id}
#[instrument(name = "get_room", skip(state))]
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomResponse>, AppError> {
    let room = state.room_service.get_room_details(&room_id).await?;
    Ok(Json(room))
}
