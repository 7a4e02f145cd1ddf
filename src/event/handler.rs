use async_trait::async_trait;
use thiserror::Error;

use super::events::RoomEvent;

/// Errors that can occur when handling room events
#[derive(Debug, Error)]
pub enum RoomEventError {
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Handler error: {0}")]
    HandlerError(String),
}

/// Trait for components that can handle room events
///
/// A handler is owned exclusively by its subscription task and processes
/// events one at a time, so it may carry mutable state without locking.
#[async_trait]
pub trait RoomEventHandler: Send {
    /// Handle a room event
    async fn handle_room_event(
        &mut self,
        room_id: &str,
        event: RoomEvent,
    ) -> Result<(), RoomEventError>;

    /// Get a human-readable name for this handler (for logging/debugging)
    fn handler_name(&self) -> &'static str;
}
