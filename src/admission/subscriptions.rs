use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::event::{EventBus, RoomSubscription, SubscriptionGuard};
use crate::room::service::RoomService;
use crate::shared::AppError;
use crate::websockets::ConnectionManager;

use super::controller::HostAdmissionController;
use super::notifier::HostChannelNotifier;
use super::subscriber::AdmissionRoomSubscriber;

/// Registry of active per-room admission subscriptions
///
/// Activation is idempotent: re-activating a room replaces the previous
/// subscription rather than adding a second one, so a rapid host role change
/// can never leave two handlers mutating the same roster.
pub struct AdmissionSubscriptions {
    event_bus: EventBus,
    room_service: Arc<RoomService>,
    connections: Arc<dyn ConnectionManager>,
    active: Mutex<HashMap<String, SubscriptionGuard>>,
}

impl AdmissionSubscriptions {
    pub fn new(
        event_bus: EventBus,
        room_service: Arc<RoomService>,
        connections: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            event_bus,
            room_service,
            connections,
            active: Mutex::new(HashMap::new()),
        }
    }

    /// Start admission handling for a room
    ///
    /// The room's current host becomes the recipient of host-facing notices.
    pub async fn activate(&self, room_id: &str) -> Result<(), AppError> {
        let room = self
            .room_service
            .get_room(room_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room not found: {}", room_id)))?;

        let notifier = Arc::new(HostChannelNotifier::new(
            room.host_id.clone(),
            self.connections.clone(),
        ));
        let controller = HostAdmissionController::new(
            room_id.to_string(),
            self.connections.clone(),
            notifier,
        );
        let subscriber = AdmissionRoomSubscriber::new(
            controller,
            self.room_service.clone(),
            self.connections.clone(),
        );

        let guard = RoomSubscription::new(
            room_id.to_string(),
            Box::new(subscriber),
            self.event_bus.clone(),
        )
        .start()
        .await;

        let mut active = self.active.lock().await;
        if active.insert(room_id.to_string(), guard).is_some() {
            info!(room_id = %room_id, "Replaced existing admission subscription");
        } else {
            info!(room_id = %room_id, "Admission subscription activated");
        }
        Ok(())
    }

    /// Stop admission handling for a room; pending entries are discarded
    pub async fn deactivate(&self, room_id: &str) {
        let mut active = self.active.lock().await;
        if active.remove(room_id).is_some() {
            info!(room_id = %room_id, "Admission subscription deactivated");
        } else {
            debug!(room_id = %room_id, "No admission subscription to deactivate");
        }
    }

    pub async fn is_active(&self, room_id: &str) -> bool {
        self.active.lock().await.contains_key(room_id)
    }
}
