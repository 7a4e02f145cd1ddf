//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use anteroom::websockets::{MessageType, WebSocketMessage};

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct MessageAssertion<'a> {
    setup: &'a TestSetup,
    session_handle: &'a str,
}

impl<'a> MessageAssertion<'a> {
    /// Create an assertion for one session's outbound messages
    pub fn for_session(setup: &'a TestSetup, session_handle: &'a str) -> Self {
        Self {
            setup,
            session_handle,
        }
    }

    /// Assert that the session received a specific message type next
    /// (consumes the message from its queue)
    pub async fn received_message_type(self, expected_type: MessageType) -> MessageContent {
        let message = self
            .setup
            .mock_conn_manager
            .consume_message_for(self.session_handle)
            .await;
        assert!(
            message.is_some(),
            "{} should have received a message",
            self.session_handle
        );

        let msg: WebSocketMessage = serde_json::from_str(&message.unwrap()).unwrap();
        assert_eq!(
            msg.message_type, expected_type,
            "{} received wrong message type",
            self.session_handle
        );

        MessageContent {
            payload: msg.payload,
        }
    }

    /// Assert that the session received no messages at all
    pub async fn received_no_messages(self) {
        let messages = self
            .setup
            .mock_conn_manager
            .get_messages_for(self.session_handle)
            .await;
        assert!(
            messages.is_empty(),
            "{} should not have received any messages, got {:?}",
            self.session_handle,
            messages
        );
    }

    /// Count how many messages of a specific type the session received
    /// (non-consuming)
    pub async fn count_message_type(&self, msg_type: MessageType) -> usize {
        let messages = self
            .setup
            .mock_conn_manager
            .get_messages_for(self.session_handle)
            .await;
        messages
            .iter()
            .filter_map(|msg_str| serde_json::from_str::<WebSocketMessage>(msg_str).ok())
            .filter(|msg| msg.message_type == msg_type)
            .count()
    }
}

// ============================================================================
// Message Content Assertions
// ============================================================================

pub struct MessageContent {
    payload: serde_json::Value,
}

impl MessageContent {
    /// Assert the message carries a specific guest id
    pub fn with_guest_id(self, expected: &str) -> Self {
        assert_eq!(self.payload["guest_id"], expected);
        self
    }

    /// Assert the message carries a specific guest name
    pub fn with_guest_name(self, expected: &str) -> Self {
        assert_eq!(self.payload["guest_name"], expected);
        self
    }

    /// Assert the message carries a specific session handle
    pub fn with_session_handle(self, expected: &str) -> Self {
        assert_eq!(self.payload["session_handle"], expected);
        self
    }

    /// Assert the aggregate admitted count
    pub fn with_count(self, expected: usize) -> Self {
        assert_eq!(self.payload["count"], expected);
        self
    }

    /// The session handles in a WAITING_LIST payload, in order
    pub fn waiting_handles(&self) -> Vec<String> {
        self.payload["waiting"]
            .as_array()
            .expect("waiting list payload should carry an array")
            .iter()
            .map(|entry| entry["session_handle"].as_str().unwrap().to_string())
            .collect()
    }
}
