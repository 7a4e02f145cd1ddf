// Public API
pub use connection_manager::{ConnectionManager, InMemoryConnectionManager};
pub use handler::{websocket_handler, WebsocketReceiveHandler};
pub use messages::{MessageType, WebSocketMessage};
pub use socket::{ConnectionContext, MessageHandler};

// Internal modules
mod connection_manager;
mod handler;
mod messages;
mod socket;
