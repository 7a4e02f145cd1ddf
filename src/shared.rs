use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::admission::AdmissionSubscriptions;
use crate::event::EventBus;
use crate::room::service::RoomService;
use crate::session::service::SessionService;
use crate::websockets::ConnectionManager;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub room_service: Arc<RoomService>,
    pub connection_manager: Arc<dyn ConnectionManager>,
    pub event_bus: EventBus,
    pub admission: Arc<AdmissionSubscriptions>,
}

impl AppState {
    pub fn new(
        session_service: Arc<SessionService>,
        room_service: Arc<RoomService>,
        connection_manager: Arc<dyn ConnectionManager>,
        event_bus: EventBus,
        admission: Arc<AdmissionSubscriptions>,
    ) -> Self {
        Self {
            session_service,
            room_service,
            connection_manager,
            event_bus,
            admission,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("JWT error: {0}")]
    JwtError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::JwtError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
