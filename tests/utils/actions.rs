use tokio::time::{sleep, Duration};

use anteroom::{
    event::RoomEvent,
    websockets::{ConnectionContext, MessageHandler, WebSocketMessage},
};

use super::setup::{TestSetup, HOST_ID, HOST_NAME, HOST_SESSION};

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    fn ctx(&self, guest_id: &str, guest_name: &str, session_handle: &str) -> ConnectionContext {
        ConnectionContext {
            guest_id: guest_id.to_string(),
            guest_name: guest_name.to_string(),
            session_handle: session_handle.to_string(),
            room_id: self.room_id.clone(),
        }
    }

    /// Deliver a WebSocket message as a given connection and wait for processing
    pub async fn send_message(&self, ctx: &ConnectionContext, message: WebSocketMessage) {
        let message_json = serde_json::to_string(&message).unwrap();
        self.input_handler.handle_message(ctx, message_json).await;
        sleep(Duration::from_millis(10)).await;
    }

    /// Emit a room event and wait for processing
    pub async fn emit_event(&self, event: RoomEvent) {
        self.event_bus.emit_to_room(&self.room_id, event).await;
        sleep(Duration::from_millis(10)).await;
    }

    /// Clear all recorded messages
    pub async fn clear_messages(&self) {
        self.mock_conn_manager.clear_messages().await;
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    /// Register a guest's live connection with the mock channel
    pub async fn connect_guest(&self, guest_id: &str, session_handle: &str) {
        self.mock_conn_manager
            .add_connected_session(session_handle, guest_id)
            .await;
    }

    /// Send a join request from a guest connection
    pub async fn send_join_request(&self, guest_id: &str, guest_name: &str, session_handle: &str) {
        let ctx = self.ctx(guest_id, guest_name, session_handle);
        self.send_message(
            &ctx,
            WebSocketMessage::join_request(guest_id.to_string(), guest_name.to_string()),
        )
        .await;
    }

    /// Send a cancel from a guest connection
    pub async fn send_cancel(&self, guest_id: &str, session_handle: &str) {
        let ctx = self.ctx(guest_id, "", session_handle);
        self.send_message(&ctx, WebSocketMessage::cancel_join_request())
            .await;
    }

    /// Send an approve action as the host
    pub async fn send_approve(&self, target_session: &str) {
        let ctx = self.ctx(HOST_ID, HOST_NAME, HOST_SESSION);
        self.send_message(&ctx, WebSocketMessage::approve_guest(target_session.to_string()))
            .await;
    }

    /// Send a reject action as the host
    pub async fn send_reject(&self, target_session: &str) {
        let ctx = self.ctx(HOST_ID, HOST_NAME, HOST_SESSION);
        self.send_message(&ctx, WebSocketMessage::reject_guest(target_session.to_string()))
            .await;
    }

    /// Send an approve-all action as the host
    pub async fn send_approve_all(&self) {
        let ctx = self.ctx(HOST_ID, HOST_NAME, HOST_SESSION);
        self.send_message(&ctx, WebSocketMessage::approve_all_guests())
            .await;
    }

    /// Ask for the waiting roster as the host
    pub async fn send_list_waiting(&self) {
        let ctx = self.ctx(HOST_ID, HOST_NAME, HOST_SESSION);
        self.send_message(&ctx, WebSocketMessage::list_waiting())
            .await;
    }

    /// Send an admission action impersonating a non-host connection
    pub async fn send_approve_as(&self, guest_id: &str, session_handle: &str, target_session: &str) {
        let ctx = self.ctx(guest_id, "", session_handle);
        self.send_message(&ctx, WebSocketMessage::approve_guest(target_session.to_string()))
            .await;
    }

    /// Report a guest session as disconnected
    pub async fn emit_disconnect(&self, session_handle: &str) {
        self.emit_event(RoomEvent::GuestDisconnected {
            session_handle: session_handle.to_string(),
        })
        .await;
    }
}
