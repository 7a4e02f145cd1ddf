use std::sync::Arc;

use anteroom::{
    admission::{AdmissionRoomSubscriber, HostAdmissionController},
    event::{EventBus, RoomSubscription, SubscriptionGuard},
    room::{
        models::RoomModel,
        repository::{InMemoryRoomRepository, RoomRepository},
        service::RoomService,
    },
    websockets::WebsocketReceiveHandler,
};

use super::mocks::{MockConnectionManager, RecordingNotificationSink};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub const ROOM_ID: &str = "room-123";
pub const HOST_ID: &str = "host-1";
pub const HOST_NAME: &str = "hana";
pub const HOST_SESSION: &str = "host-session";

pub struct TestSetup {
    pub event_bus: EventBus,
    pub mock_conn_manager: Arc<MockConnectionManager>,
    pub notifier: Arc<RecordingNotificationSink>,
    pub input_handler: WebsocketReceiveHandler,
    pub room_service: Arc<RoomService>,
    pub room_id: String,
    pub _subscription_guard: SubscriptionGuard,
}

pub struct TestSetupBuilder {
    room_id: String,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            room_id: ROOM_ID.to_string(),
        }
    }

    pub fn with_room_id(mut self, room_id: &str) -> Self {
        self.room_id = room_id.to_string();
        self
    }

    pub async fn build(self) -> TestSetup {
        let event_bus = EventBus::new();
        let repo = Arc::new(InMemoryRoomRepository::new());
        let mock_conn_manager = Arc::new(MockConnectionManager::new());
        let notifier = Arc::new(RecordingNotificationSink::new());

        // Create the room with a fixed id and host
        let room = RoomModel {
            id: self.room_id.clone(),
            host_id: HOST_ID.to_string(),
            host_name: HOST_NAME.to_string(),
            status: "ONLINE".to_string(),
            member_ids: vec![HOST_ID.to_string()],
        };
        repo.create_room(&room).await.unwrap();

        let room_service = Arc::new(RoomService::new(repo));

        // Connect the host
        mock_conn_manager
            .add_connected_session(HOST_SESSION, HOST_ID)
            .await;

        let input_handler = WebsocketReceiveHandler::new(event_bus.clone());

        let controller = HostAdmissionController::new(
            self.room_id.clone(),
            mock_conn_manager.clone(),
            notifier.clone(),
        );
        let subscriber = AdmissionRoomSubscriber::new(
            controller,
            room_service.clone(),
            mock_conn_manager.clone(),
        );

        let subscription = RoomSubscription::new(
            self.room_id.clone(),
            Box::new(subscriber),
            event_bus.clone(),
        );
        let subscription_guard = subscription.start().await;

        TestSetup {
            event_bus,
            mock_conn_manager,
            notifier,
            input_handler,
            room_service,
            room_id: self.room_id,
            _subscription_guard: subscription_guard,
        }
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}
