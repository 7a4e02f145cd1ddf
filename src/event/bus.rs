use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use super::events::RoomEvent;

const ROOM_CHANNEL_CAPACITY: usize = 100;

/// Event bus for distributing events throughout the application
///
/// Each room gets its own broadcast channel, created lazily on the first
/// emit or subscribe that touches it.
#[derive(Debug, Clone)]
pub struct EventBus {
    /// Room-specific event channels: room_id -> sender
    room_channels: Arc<RwLock<HashMap<String, broadcast::Sender<RoomEvent>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            room_channels: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn sender_for(&self, room_id: &str) -> broadcast::Sender<RoomEvent> {
        if let Some(sender) = self.room_channels.read().await.get(room_id) {
            return sender.clone();
        }

        let mut room_channels = self.room_channels.write().await;
        room_channels
            .entry(room_id.to_string())
            .or_insert_with(|| {
                debug!(room_id = %room_id, "Creating room event channel");
                broadcast::channel(ROOM_CHANNEL_CAPACITY).0
            })
            .clone()
    }

    /// Emits an event to all subscribers of a specific room
    pub async fn emit_to_room(&self, room_id: &str, event: RoomEvent) {
        match self.sender_for(room_id).await.send(event) {
            Ok(receivers) => {
                debug!(room_id = %room_id, receivers, "Room event emitted");
            }
            Err(_) => {
                debug!(room_id = %room_id, "Room event emitted with no receivers");
            }
        }
    }

    /// Subscribe to events for a specific room
    pub async fn subscribe_to_room(&self, room_id: &str) -> broadcast::Receiver<RoomEvent> {
        self.sender_for(room_id).await.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
