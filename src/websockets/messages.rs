use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::admission::JoinRequest;

/// Message types for WebSocket communication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    // Client -> Server
    JoinRequest,
    CancelJoinRequest,
    ApproveGuest,
    RejectGuest,
    ApproveAllGuests,
    ListWaiting,

    // Server -> Client
    JoinApproved,
    JoinRejected,
    GuestWaiting,
    GuestAdmitted,
    GuestDeclined,
    GuestLeftWaiting,
    GuestsAdmitted,
    WaitingList,
    Error,
}

/// Metadata for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessageMeta {
    pub timestamp: DateTime<Utc>,
    pub session_handle: Option<String>,
}

/// Base structure for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub payload: serde_json::Value,
    pub meta: Option<WebSocketMessageMeta>,
}

/// Client-to-Server message payloads
///
/// The room and the sender's session handle are not part of any inbound
/// payload: the server stamps both from the connection itself, so a client
/// cannot act on behalf of another session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequestPayload {
    pub guest_id: String,
    pub guest_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveGuestPayload {
    pub session_handle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectGuestPayload {
    pub session_handle: String,
}

/// Server-to-Client message payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinApprovedPayload {
    pub guest_id: String,
    pub guest_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRejectedPayload {
    pub guest_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestWaitingPayload {
    pub guest_id: String,
    pub guest_name: String,
    pub session_handle: String,
    pub requested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestResolvedPayload {
    pub guest_id: String,
    pub guest_name: String,
    pub session_handle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestLeftWaitingPayload {
    pub session_handle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestsAdmittedPayload {
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitingListPayload {
    /// Pending requests in arrival order, oldest first
    pub waiting: Vec<JoinRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

/// Helper functions for creating messages
impl WebSocketMessage {
    pub fn new(message_type: MessageType, payload: serde_json::Value) -> Self {
        Self {
            message_type,
            payload,
            meta: Some(WebSocketMessageMeta {
                timestamp: Utc::now(),
                session_handle: None,
            }),
        }
    }

    /// Create a JOIN_REQUEST message
    pub fn join_request(guest_id: String, guest_name: String) -> Self {
        let payload = JoinRequestPayload {
            guest_id,
            guest_name,
        };
        Self::new(
            MessageType::JoinRequest,
            serde_json::to_value(payload).unwrap(),
        )
    }

    /// Create a CANCEL_JOIN_REQUEST message
    pub fn cancel_join_request() -> Self {
        Self::new(MessageType::CancelJoinRequest, serde_json::json!({}))
    }

    /// Create an APPROVE_GUEST message
    pub fn approve_guest(session_handle: String) -> Self {
        let payload = ApproveGuestPayload { session_handle };
        Self::new(
            MessageType::ApproveGuest,
            serde_json::to_value(payload).unwrap(),
        )
    }

    /// Create a REJECT_GUEST message
    pub fn reject_guest(session_handle: String) -> Self {
        let payload = RejectGuestPayload { session_handle };
        Self::new(
            MessageType::RejectGuest,
            serde_json::to_value(payload).unwrap(),
        )
    }

    /// Create an APPROVE_ALL_GUESTS message
    pub fn approve_all_guests() -> Self {
        Self::new(MessageType::ApproveAllGuests, serde_json::json!({}))
    }

    /// Create a LIST_WAITING message
    pub fn list_waiting() -> Self {
        Self::new(MessageType::ListWaiting, serde_json::json!({}))
    }

    /// Create a JOIN_APPROVED message
    pub fn join_approved(guest_id: String, guest_name: String) -> Self {
        let payload = JoinApprovedPayload {
            guest_id,
            guest_name,
        };
        Self::new(
            MessageType::JoinApproved,
            serde_json::to_value(payload).unwrap(),
        )
    }

    /// Create a JOIN_REJECTED message
    pub fn join_rejected(guest_id: String) -> Self {
        let payload = JoinRejectedPayload { guest_id };
        Self::new(
            MessageType::JoinRejected,
            serde_json::to_value(payload).unwrap(),
        )
    }

    /// Create a GUEST_WAITING message
    pub fn guest_waiting(request: &JoinRequest) -> Self {
        let payload = GuestWaitingPayload {
            guest_id: request.guest_id.clone(),
            guest_name: request.guest_name.clone(),
            session_handle: request.session_handle.clone(),
            requested_at: request.requested_at,
        };
        Self::new(
            MessageType::GuestWaiting,
            serde_json::to_value(payload).unwrap(),
        )
    }

    /// Create a GUEST_ADMITTED message
    pub fn guest_admitted(request: &JoinRequest) -> Self {
        let payload = GuestResolvedPayload {
            guest_id: request.guest_id.clone(),
            guest_name: request.guest_name.clone(),
            session_handle: request.session_handle.clone(),
        };
        Self::new(
            MessageType::GuestAdmitted,
            serde_json::to_value(payload).unwrap(),
        )
    }

    /// Create a GUEST_DECLINED message
    pub fn guest_declined(request: &JoinRequest) -> Self {
        let payload = GuestResolvedPayload {
            guest_id: request.guest_id.clone(),
            guest_name: request.guest_name.clone(),
            session_handle: request.session_handle.clone(),
        };
        Self::new(
            MessageType::GuestDeclined,
            serde_json::to_value(payload).unwrap(),
        )
    }

    /// Create a GUEST_LEFT_WAITING message
    pub fn guest_left_waiting(session_handle: String) -> Self {
        let payload = GuestLeftWaitingPayload { session_handle };
        Self::new(
            MessageType::GuestLeftWaiting,
            serde_json::to_value(payload).unwrap(),
        )
    }

    /// Create a GUESTS_ADMITTED message
    pub fn guests_admitted(count: usize) -> Self {
        let payload = GuestsAdmittedPayload { count };
        Self::new(
            MessageType::GuestsAdmitted,
            serde_json::to_value(payload).unwrap(),
        )
    }

    /// Create a WAITING_LIST message
    pub fn waiting_list(waiting: Vec<JoinRequest>) -> Self {
        let payload = WaitingListPayload { waiting };
        Self::new(
            MessageType::WaitingList,
            serde_json::to_value(payload).unwrap(),
        )
    }

    /// Create an ERROR message
    pub fn error(message: String) -> Self {
        let payload = ErrorPayload { message };
        Self::new(MessageType::Error, serde_json::to_value(payload).unwrap())
    }
}
