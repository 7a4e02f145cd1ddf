// Library crate for the room admission-control server
// This file exposes the public API for integration tests

pub mod admission;
pub mod event;
pub mod room;
pub mod session;
pub mod shared;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use admission::{
    AdmissionRoomSubscriber, AdmissionSubscriptions, GuestAdmissionClient, GuestAdmissionState,
    HostAdmissionController, JoinRequest, NotificationSink, PendingRoster,
};
pub use event::{EventBus, RoomEvent, RoomSubscription, SubscriptionGuard};
pub use shared::AppError;
pub use websockets::{
    ConnectionContext, ConnectionManager, MessageHandler, MessageType, WebSocketMessage,
    WebsocketReceiveHandler,
};
