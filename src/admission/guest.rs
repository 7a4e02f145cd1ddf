use std::fmt;
use std::sync::Arc;
use strum_macros::EnumIter;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::websockets::{MessageType, WebSocketMessage};

use super::notifier::{NotificationSink, TracingNotificationSink};

/// Lifecycle of one guest's attempt to enter a room
///
/// Approved and Rejected are terminal for this client instance; a fresh
/// request after a rejection starts the cycle over and is deliberate
/// (people ask again).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter)]
pub enum GuestAdmissionState {
    #[default]
    Idle,
    Waiting,
    Approved,
    Rejected,
}

impl fmt::Display for GuestAdmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GuestAdmissionState::Idle => "idle",
            GuestAdmissionState::Waiting => "waiting",
            GuestAdmissionState::Approved => "approved",
            GuestAdmissionState::Rejected => "rejected",
        };
        write!(f, "{}", name)
    }
}

/// Identity this client requests entry under
#[derive(Debug, Clone)]
pub struct GuestIdentity {
    pub guest_id: String,
    pub guest_name: String,
}

/// Guest-side half of the admission protocol
///
/// Owned by a single participant. Requests are optimistic: the client marks
/// itself as waiting the moment it asks, before any confirmation, and relies
/// on inbound resolution messages for the terminal transitions. The channel,
/// room, and identity are wired in as they become available; operations
/// invoked before all three are known simply do nothing.
pub struct GuestAdmissionClient {
    state: GuestAdmissionState,
    channel: Option<mpsc::UnboundedSender<WebSocketMessage>>,
    room_id: Option<String>,
    identity: Option<GuestIdentity>,
    notifier: Arc<dyn NotificationSink>,
}

impl GuestAdmissionClient {
    pub fn new() -> Self {
        Self::with_notifier(Arc::new(TracingNotificationSink))
    }

    pub fn with_notifier(notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            state: GuestAdmissionState::Idle,
            channel: None,
            room_id: None,
            identity: None,
            notifier,
        }
    }

    /// Wire up the outbound half of the message channel
    pub fn attach_channel(&mut self, sender: mpsc::UnboundedSender<WebSocketMessage>) {
        self.channel = Some(sender);
    }

    pub fn detach_channel(&mut self) {
        self.channel = None;
    }

    pub fn set_room(&mut self, room_id: String) {
        self.room_id = Some(room_id);
    }

    pub fn set_identity(&mut self, identity: GuestIdentity) {
        self.identity = Some(identity);
    }

    pub fn state(&self) -> GuestAdmissionState {
        self.state
    }

    pub fn is_waiting(&self) -> bool {
        self.state == GuestAdmissionState::Waiting
    }

    /// Ask to enter the room
    ///
    /// Marks this client as waiting before the request is even sent; no
    /// acknowledgment is expected. Does nothing while the channel, room, or
    /// identity is not yet known.
    pub fn request_to_join(&mut self) {
        let (channel, room_id, identity) = match (&self.channel, &self.room_id, &self.identity) {
            (Some(channel), Some(room_id), Some(identity)) => (channel, room_id, identity),
            _ => {
                debug!("Join request skipped - channel, room, or identity not available");
                return;
            }
        };

        self.state = GuestAdmissionState::Waiting;
        info!(
            room_id = %room_id,
            guest_id = %identity.guest_id,
            "Requesting to join room"
        );

        let message = WebSocketMessage::join_request(
            identity.guest_id.clone(),
            identity.guest_name.clone(),
        );
        let _ = channel.send(message);
    }

    /// Withdraw a pending request
    ///
    /// The local reset to Idle always happens, whatever the current state;
    /// the emitted cancel message is ignored by the host if no matching
    /// request is pending, so calling this redundantly is harmless.
    pub fn cancel_waiting(&mut self) {
        if let (Some(channel), Some(room_id)) = (&self.channel, &self.room_id) {
            debug!(room_id = %room_id, "Cancelling join request");
            let _ = channel.send(WebSocketMessage::cancel_join_request());
        }
        self.state = GuestAdmissionState::Idle;
    }

    /// React to a resolution message addressed to this session
    pub async fn handle_server_message(&mut self, message: &WebSocketMessage) {
        let room_id = self.room_id.clone().unwrap_or_default();
        match message.message_type {
            MessageType::JoinApproved => {
                info!(room_id = %room_id, "Join request approved");
                self.state = GuestAdmissionState::Approved;
                self.notifier.admission_granted(&room_id).await;
            }
            MessageType::JoinRejected => {
                info!(room_id = %room_id, "Join request rejected");
                self.state = GuestAdmissionState::Rejected;
                self.notifier.admission_denied(&room_id).await;
            }
            _ => {
                debug!(
                    message_type = ?message.message_type,
                    "Message not relevant to admission state"
                );
            }
        }
    }
}

impl Default for GuestAdmissionClient {
    fn default() -> Self {
        Self::new()
    }
}
