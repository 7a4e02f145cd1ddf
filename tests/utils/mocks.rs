use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use anteroom::admission::{JoinRequest, NotificationSink};
use anteroom::websockets::ConnectionManager;

// ============================================================================
// Mock Infrastructure
// ============================================================================

#[derive(Clone)]
pub struct MockConnectionManager {
    // session_handle -> messages sent to it
    sent_messages: Arc<RwLock<HashMap<String, Vec<String>>>>,
    // session_handle -> guest_id
    connected_sessions: Arc<RwLock<HashMap<String, String>>>,
}

impl MockConnectionManager {
    pub fn new() -> Self {
        Self {
            sent_messages: Arc::new(RwLock::new(HashMap::new())),
            connected_sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn add_connected_session(&self, session_handle: &str, guest_id: &str) {
        self.connected_sessions
            .write()
            .await
            .insert(session_handle.to_string(), guest_id.to_string());
    }

    pub async fn get_messages_for(&self, session_handle: &str) -> Vec<String> {
        self.sent_messages
            .read()
            .await
            .get(session_handle)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn consume_message_for(&self, session_handle: &str) -> Option<String> {
        let mut messages = self.sent_messages.write().await;
        let queue = messages.get_mut(session_handle)?;
        if queue.is_empty() {
            None
        } else {
            Some(queue.remove(0))
        }
    }

    pub async fn clear_messages(&self) {
        self.sent_messages.write().await.clear();
    }
}

#[async_trait]
impl ConnectionManager for MockConnectionManager {
    async fn add_connection(
        &self,
        session_handle: String,
        guest_id: String,
        _sender: mpsc::UnboundedSender<String>,
    ) {
        self.add_connected_session(&session_handle, &guest_id).await;
    }

    async fn remove_connection(&self, session_handle: &str) {
        self.connected_sessions.write().await.remove(session_handle);
    }

    async fn send_to_session(&self, session_handle: &str, message: &str) {
        self.sent_messages
            .write()
            .await
            .entry(session_handle.to_string())
            .or_default()
            .push(message.to_string());
    }

    async fn send_to_guest(&self, guest_id: &str, message: &str) {
        let sessions: Vec<String> = self
            .connected_sessions
            .read()
            .await
            .iter()
            .filter(|(_, g)| g.as_str() == guest_id)
            .map(|(s, _)| s.clone())
            .collect();

        for session in sessions {
            self.send_to_session(&session, message).await;
        }
    }
}

/// Records every sink notice so tests can assert on notification behavior
#[derive(Default)]
pub struct RecordingNotificationSink {
    pub waiting: Arc<RwLock<Vec<String>>>,  // guest ids
    pub admitted: Arc<RwLock<Vec<String>>>, // guest ids
    pub declined: Arc<RwLock<Vec<String>>>, // guest ids
    pub aggregate: Arc<RwLock<Vec<usize>>>, // approve-all counts
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn waiting_notices(&self) -> Vec<String> {
        self.waiting.read().await.clone()
    }

    pub async fn admitted_notices(&self) -> Vec<String> {
        self.admitted.read().await.clone()
    }

    pub async fn declined_notices(&self) -> Vec<String> {
        self.declined.read().await.clone()
    }

    pub async fn aggregate_notices(&self) -> Vec<usize> {
        self.aggregate.read().await.clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn guest_waiting(&self, _room_id: &str, request: &JoinRequest) {
        self.waiting.write().await.push(request.guest_id.clone());
    }

    async fn guest_admitted(&self, _room_id: &str, request: &JoinRequest) {
        self.admitted.write().await.push(request.guest_id.clone());
    }

    async fn guest_declined(&self, _room_id: &str, request: &JoinRequest) {
        self.declined.write().await.push(request.guest_id.clone());
    }

    async fn all_admitted(&self, _room_id: &str, count: usize) {
        self.aggregate.write().await.push(count);
    }

    async fn admission_granted(&self, _room_id: &str) {}

    async fn admission_denied(&self, _room_id: &str) {}
}
