use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// Routes outbound messages to live connections
///
/// Connections are keyed by session handle; the guest id is kept alongside so
/// a message can also be fanned out to every live session of one identity
/// (e.g. a host connected from two devices).
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    async fn add_connection(
        &self,
        session_handle: String,
        guest_id: String,
        sender: mpsc::UnboundedSender<String>,
    );

    async fn remove_connection(&self, session_handle: &str);

    /// Send to one specific live connection; dropped silently if it is gone
    async fn send_to_session(&self, session_handle: &str, message: &str);

    /// Send to every live connection of one participant identity
    async fn send_to_guest(&self, guest_id: &str, message: &str);
}

struct ConnectionEntry {
    guest_id: String,
    sender: mpsc::UnboundedSender<String>,
}

pub struct InMemoryConnectionManager {
    // session_handle -> entry
    connections: Arc<RwLock<HashMap<String, ConnectionEntry>>>,
}

impl InMemoryConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionManager for InMemoryConnectionManager {
    async fn add_connection(
        &self,
        session_handle: String,
        guest_id: String,
        sender: mpsc::UnboundedSender<String>,
    ) {
        let mut connections = self.connections.write().await;
        connections.insert(session_handle, ConnectionEntry { guest_id, sender });
    }

    async fn remove_connection(&self, session_handle: &str) {
        let mut connections = self.connections.write().await;
        connections.remove(session_handle);
    }

    async fn send_to_session(&self, session_handle: &str, message: &str) {
        let connections = self.connections.read().await;
        if let Some(entry) = connections.get(session_handle) {
            let _ = entry.sender.send(message.to_string());
        }
    }

    async fn send_to_guest(&self, guest_id: &str, message: &str) {
        let connections = self.connections.read().await;
        for entry in connections.values() {
            if entry.guest_id == guest_id {
                let _ = entry.sender.send(message.to_string());
            }
        }
    }
}
