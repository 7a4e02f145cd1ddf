use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::{bus::EventBus, handler::RoomEventHandler};

/// Manages a room event subscription and routes events to its handler
///
/// The spawned task takes exclusive ownership of the handler, so all events
/// for the room are processed sequentially by a single owner.
pub struct RoomSubscription {
    room_id: String,
    handler: Box<dyn RoomEventHandler>,
    event_bus: EventBus,
}

impl RoomSubscription {
    pub fn new(room_id: String, handler: Box<dyn RoomEventHandler>, event_bus: EventBus) -> Self {
        Self {
            room_id,
            handler,
            event_bus,
        }
    }

    /// Start the subscription - spawns a background task that listens to room
    /// events and routes them to the handler. The returned guard aborts the
    /// task when dropped, so deregistration happens on every exit path.
    pub async fn start(self) -> SubscriptionGuard {
        let room_id = self.room_id.clone();
        let handler_name = self.handler.handler_name();

        info!(
            room_id = %room_id,
            handler = handler_name,
            "Starting room subscription"
        );

        let mut receiver = self.event_bus.subscribe_to_room(&room_id).await;
        let mut handler = self.handler;

        let task_room_id = room_id.clone();
        let handle = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => {
                        if let Err(e) = handler.handle_room_event(&task_room_id, event).await {
                            info!(
                                room_id = %task_room_id,
                                handler = handler_name,
                                error = %e,
                                "Room event handler failed"
                            );
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(
                            room_id = %task_room_id,
                            handler = handler_name,
                            skipped = skipped,
                            "Room subscription lagged behind the event channel"
                        );
                    }
                    Err(RecvError::Closed) => {
                        warn!(
                            room_id = %task_room_id,
                            handler = handler_name,
                            "Room subscription ended - no more events"
                        );
                        break;
                    }
                }
            }
        });

        SubscriptionGuard { room_id, handle }
    }
}

/// Scoped handle to a running subscription; dropping it stops the task
pub struct SubscriptionGuard {
    room_id: String,
    handle: JoinHandle<()>,
}

impl SubscriptionGuard {
    pub fn room_id(&self) -> &str {
        &self.room_id
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        info!(room_id = %self.room_id, "Stopping room subscription");
        self.handle.abort();
    }
}
