pub mod actions;
pub mod assertions;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use assertions::{MessageAssertion, MessageContent};
#[allow(unused_imports)]
pub use mocks::{MockConnectionManager, RecordingNotificationSink};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder, HOST_ID, HOST_NAME, HOST_SESSION, ROOM_ID};
