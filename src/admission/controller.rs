use std::sync::Arc;
use tracing::{debug, info};

use crate::websockets::{ConnectionManager, WebSocketMessage};

use super::notifier::NotificationSink;
use super::roster::{JoinRequest, PendingRoster};

/// Host-side authority over one room's waiting guests
///
/// The controller is the only owner of the pending roster; every mutation
/// goes through the operations below, each of which is safe to call
/// redundantly. Approving or rejecting an entry that is already gone is a
/// no-op, which is what makes reordered cancel/approve/disconnect messages
/// harmless.
///
/// The controller does not check who is asking. Callers activate it only for
/// the room's host; see the admission subscription for that gate.
pub struct HostAdmissionController {
    room_id: String,
    roster: PendingRoster,
    connections: Arc<dyn ConnectionManager>,
    notifier: Arc<dyn NotificationSink>,
}

impl HostAdmissionController {
    pub fn new(
        room_id: String,
        connections: Arc<dyn ConnectionManager>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            room_id,
            roster: PendingRoster::new(),
            connections,
            notifier,
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Pending requests in arrival order
    pub fn pending_requests(&self) -> &[JoinRequest] {
        self.roster.entries()
    }

    /// Record a newly observed join request
    ///
    /// A request matching a pending entry by session handle or guest id is
    /// discarded silently; the channel is at-least-once and clients may
    /// double-submit. Only the first observation of a guest notifies the
    /// sink. Returns true if the request became a new roster entry.
    pub async fn handle_incoming_request(&mut self, request: JoinRequest) -> bool {
        if !self.roster.insert(request.clone()) {
            debug!(
                room_id = %self.room_id,
                guest_id = %request.guest_id,
                session_handle = %request.session_handle,
                "Duplicate join request discarded"
            );
            return false;
        }

        info!(
            room_id = %self.room_id,
            guest_id = %request.guest_id,
            guest_name = %request.guest_name,
            session_handle = %request.session_handle,
            pending = self.roster.len(),
            "Join request added to waiting roster"
        );
        self.notifier.guest_waiting(&self.room_id, &request).await;
        true
    }

    /// Admit the waiting guest identified by its session handle
    ///
    /// Emits one approval message addressed to that session, removes the
    /// entry, and notifies the sink. A handle with no pending entry means the
    /// request was already resolved; nothing happens.
    pub async fn approve_guest(&mut self, session_handle: &str) -> Option<JoinRequest> {
        let request = match self.roster.remove(session_handle) {
            Some(request) => request,
            None => {
                debug!(
                    room_id = %self.room_id,
                    session_handle = %session_handle,
                    "Approve for unknown session - already resolved"
                );
                return None;
            }
        };

        self.send_approval(&request).await;

        info!(
            room_id = %self.room_id,
            guest_id = %request.guest_id,
            session_handle = %request.session_handle,
            "Guest approved"
        );
        self.notifier.guest_admitted(&self.room_id, &request).await;
        Some(request)
    }

    /// Turn away the waiting guest identified by its session handle
    pub async fn reject_guest(&mut self, session_handle: &str) -> Option<JoinRequest> {
        let request = match self.roster.remove(session_handle) {
            Some(request) => request,
            None => {
                debug!(
                    room_id = %self.room_id,
                    session_handle = %session_handle,
                    "Reject for unknown session - already resolved"
                );
                return None;
            }
        };

        let message = WebSocketMessage::join_rejected(request.guest_id.clone());
        if let Ok(json) = serde_json::to_string(&message) {
            self.connections
                .send_to_session(&request.session_handle, &json)
                .await;
        }

        info!(
            room_id = %self.room_id,
            guest_id = %request.guest_id,
            session_handle = %request.session_handle,
            "Guest rejected"
        );
        self.notifier.guest_declined(&self.room_id, &request).await;
        Some(request)
    }

    /// Admit every guest currently waiting
    ///
    /// The roster is snapshotted at call time; each guest in the snapshot
    /// gets its own approval message, the roster is cleared in one operation,
    /// and the sink gets a single aggregate notice. Requests observed after
    /// this call remain pending.
    pub async fn approve_all_guests(&mut self) -> Vec<JoinRequest> {
        let approved = self.roster.drain_all();
        if approved.is_empty() {
            debug!(room_id = %self.room_id, "Approve all with empty roster");
            return approved;
        }

        for request in &approved {
            self.send_approval(request).await;
        }

        info!(
            room_id = %self.room_id,
            count = approved.len(),
            "All waiting guests approved"
        );
        self.notifier
            .all_admitted(&self.room_id, approved.len())
            .await;
        approved
    }

    /// Drop a pending entry whose session cancelled or disconnected
    ///
    /// Passive cleanup: no resolution message, no sink notice. Returns the
    /// removed entry so the caller can sync any host-side view of the roster.
    pub fn handle_cancel_or_disconnect(&mut self, session_handle: &str) -> Option<JoinRequest> {
        let removed = self.roster.remove(session_handle);
        match &removed {
            Some(request) => {
                info!(
                    room_id = %self.room_id,
                    guest_id = %request.guest_id,
                    session_handle = %session_handle,
                    "Pending join request withdrawn"
                );
            }
            None => {
                debug!(
                    room_id = %self.room_id,
                    session_handle = %session_handle,
                    "Cancel/disconnect for session with no pending request"
                );
            }
        }
        removed
    }

    async fn send_approval(&self, request: &JoinRequest) {
        let message =
            WebSocketMessage::join_approved(request.guest_id.clone(), request.guest_name.clone());
        if let Ok(json) = serde_json::to_string(&message) {
            self.connections
                .send_to_session(&request.session_handle, &json)
                .await;
        }
    }
}
