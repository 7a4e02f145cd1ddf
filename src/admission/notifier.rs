use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::websockets::{ConnectionManager, WebSocketMessage};

use super::roster::JoinRequest;

/// Side-effecting observer for human-facing admission notices
///
/// Implementations surface state changes to a person (a toast, a log line, a
/// wire message to the host's devices). The protocol never depends on them.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// A guest entered the waiting room; fired once per distinct guest
    async fn guest_waiting(&self, room_id: &str, request: &JoinRequest);

    /// The host admitted one guest
    async fn guest_admitted(&self, room_id: &str, request: &JoinRequest);

    /// The host turned one guest away
    async fn guest_declined(&self, room_id: &str, request: &JoinRequest);

    /// The host admitted everyone at once
    async fn all_admitted(&self, room_id: &str, count: usize);

    /// Guest side: this client's own request was granted
    async fn admission_granted(&self, room_id: &str);

    /// Guest side: this client's own request was denied
    async fn admission_denied(&self, room_id: &str);
}

/// Sink that writes notices to the server log
pub struct TracingNotificationSink;

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn guest_waiting(&self, room_id: &str, request: &JoinRequest) {
        info!(
            room_id = %room_id,
            guest_name = %request.guest_name,
            session_handle = %request.session_handle,
            "Guest is waiting to join"
        );
    }

    async fn guest_admitted(&self, room_id: &str, request: &JoinRequest) {
        info!(
            room_id = %room_id,
            guest_name = %request.guest_name,
            "Guest admitted"
        );
    }

    async fn guest_declined(&self, room_id: &str, request: &JoinRequest) {
        info!(
            room_id = %room_id,
            guest_name = %request.guest_name,
            "Guest declined"
        );
    }

    async fn all_admitted(&self, room_id: &str, count: usize) {
        info!(room_id = %room_id, count = count, "All waiting guests admitted");
    }

    async fn admission_granted(&self, room_id: &str) {
        info!(room_id = %room_id, "Admission granted");
    }

    async fn admission_denied(&self, room_id: &str) {
        info!(room_id = %room_id, "Admission denied");
    }
}

/// Sink that forwards host-facing notices to the host's live sessions
///
/// The host identity is fixed when the room's admission handling is
/// activated. Guest-side notices have no wire counterpart here; the guest
/// client raises those locally.
pub struct HostChannelNotifier {
    host_id: String,
    connections: Arc<dyn ConnectionManager>,
}

impl HostChannelNotifier {
    pub fn new(host_id: String, connections: Arc<dyn ConnectionManager>) -> Self {
        Self {
            host_id,
            connections,
        }
    }

    async fn send_to_host(&self, message: &WebSocketMessage) {
        if let Ok(json) = serde_json::to_string(message) {
            self.connections.send_to_guest(&self.host_id, &json).await;
        }
    }
}

#[async_trait]
impl NotificationSink for HostChannelNotifier {
    async fn guest_waiting(&self, room_id: &str, request: &JoinRequest) {
        info!(
            room_id = %room_id,
            guest_name = %request.guest_name,
            session_handle = %request.session_handle,
            "Notifying host of waiting guest"
        );
        self.send_to_host(&WebSocketMessage::guest_waiting(request))
            .await;
    }

    async fn guest_admitted(&self, room_id: &str, request: &JoinRequest) {
        debug!(room_id = %room_id, guest_name = %request.guest_name, "Guest admitted");
        self.send_to_host(&WebSocketMessage::guest_admitted(request))
            .await;
    }

    async fn guest_declined(&self, room_id: &str, request: &JoinRequest) {
        debug!(room_id = %room_id, guest_name = %request.guest_name, "Guest declined");
        self.send_to_host(&WebSocketMessage::guest_declined(request))
            .await;
    }

    async fn all_admitted(&self, room_id: &str, count: usize) {
        info!(room_id = %room_id, count = count, "All waiting guests admitted");
        self.send_to_host(&WebSocketMessage::guests_admitted(count))
            .await;
    }

    async fn admission_granted(&self, _room_id: &str) {}

    async fn admission_denied(&self, _room_id: &str) {}
}
