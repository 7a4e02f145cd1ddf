use serde::{Deserialize, Serialize};

/// Events that can occur in a room's admission flow
///
/// Events represent facts about things that have already happened on the
/// message channel. They are used to communicate between the channel layer
/// and the admission controller without tight coupling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RoomEvent {
    /// A guest asked to enter the room
    JoinRequested {
        guest_id: String,
        guest_name: String,
        session_handle: String,
    },

    /// A guest withdrew its pending join request
    JoinCancelled { session_handle: String },

    /// A session disconnected; only relevant while its request is pending
    GuestDisconnected { session_handle: String },

    /// The host asked to admit one waiting guest
    ApproveRequested {
        requested_by: String,
        session_handle: String,
    },

    /// The host asked to turn away one waiting guest
    RejectRequested {
        requested_by: String,
        session_handle: String,
    },

    /// The host asked to admit every guest currently waiting
    ApproveAllRequested { requested_by: String },

    /// The host asked for the current waiting roster
    WaitingListRequested {
        requested_by: String,
        session_handle: String,
    },
}

impl RoomEvent {
    /// Get a human-readable description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            RoomEvent::JoinRequested { .. } => "join_requested",
            RoomEvent::JoinCancelled { .. } => "join_cancelled",
            RoomEvent::GuestDisconnected { .. } => "guest_disconnected",
            RoomEvent::ApproveRequested { .. } => "approve_requested",
            RoomEvent::RejectRequested { .. } => "reject_requested",
            RoomEvent::ApproveAllRequested { .. } => "approve_all_requested",
            RoomEvent::WaitingListRequested { .. } => "waiting_list_requested",
        }
    }
}
