// Event-driven architecture components
//
// This module provides the core infrastructure for event-driven communication
// between the channel layer and the admission controller.

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::RoomEvent;
pub use handler::{RoomEventError, RoomEventHandler};
pub use subscription::{RoomSubscription, SubscriptionGuard};

// Internal modules
mod bus;
mod events;
mod handler;
mod subscription;
