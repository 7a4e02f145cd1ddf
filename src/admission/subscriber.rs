use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::event::{RoomEvent, RoomEventError, RoomEventHandler};
use crate::room::service::RoomService;
use crate::websockets::{ConnectionManager, WebSocketMessage};

use super::controller::HostAdmissionController;
use super::roster::JoinRequest;

/// Event subscriber that drives a room's admission controller
///
/// One instance exists per room with admission handling active, owned by its
/// subscription task, so roster mutations are serialized by construction.
/// Admin actions are accepted only from the room's current host; the
/// controller itself never checks. That gate lives here because the
/// controller mirrors what a host's own device would run, while this
/// subscriber is the seam where untrusted channel input comes in.
pub struct AdmissionRoomSubscriber {
    controller: HostAdmissionController,
    room_service: Arc<RoomService>,
    connections: Arc<dyn ConnectionManager>,
}

impl AdmissionRoomSubscriber {
    pub fn new(
        controller: HostAdmissionController,
        room_service: Arc<RoomService>,
        connections: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            controller,
            room_service,
            connections,
        }
    }

    async fn host_id(&self, room_id: &str) -> Result<String, RoomEventError> {
        let room = self
            .room_service
            .get_room(room_id)
            .await
            .map_err(|e| RoomEventError::HandlerError(e.to_string()))?
            .ok_or_else(|| RoomEventError::RoomNotFound(room_id.to_string()))?;
        Ok(room.host_id)
    }

    /// Whether an admin action may proceed; non-host attempts are dropped
    async fn verify_host(&self, room_id: &str, requested_by: &str) -> Result<bool, RoomEventError> {
        let host_id = self.host_id(room_id).await?;
        if host_id != requested_by {
            warn!(
                room_id = %room_id,
                requested_by = %requested_by,
                "Admission action from non-host ignored"
            );
            return Ok(false);
        }
        Ok(true)
    }

    async fn record_member(&self, room_id: &str, approved: &JoinRequest) {
        if let Err(e) = self
            .room_service
            .add_member(room_id, &approved.guest_id)
            .await
        {
            warn!(
                room_id = %room_id,
                guest_id = %approved.guest_id,
                error = %e,
                "Failed to record admitted guest as room member"
            );
        }
    }

    /// Tell the host's devices a pending entry evaporated on its own
    async fn sync_host_roster_removal(&self, room_id: &str, session_handle: &str) {
        let host_id = match self.host_id(room_id).await {
            Ok(host_id) => host_id,
            Err(_) => return, // room already gone, nothing to sync
        };

        let message = WebSocketMessage::guest_left_waiting(session_handle.to_string());
        if let Ok(json) = serde_json::to_string(&message) {
            self.connections.send_to_guest(&host_id, &json).await;
        }
    }
}

#[async_trait]
impl RoomEventHandler for AdmissionRoomSubscriber {
    async fn handle_room_event(
        &mut self,
        room_id: &str,
        event: RoomEvent,
    ) -> Result<(), RoomEventError> {
        debug!(
            room_id = %room_id,
            event = event.event_type(),
            "Handling admission event"
        );

        match event {
            RoomEvent::JoinRequested {
                guest_id,
                guest_name,
                session_handle,
            } => {
                let request = JoinRequest::new(guest_id, guest_name, session_handle);
                self.controller.handle_incoming_request(request).await;
            }

            RoomEvent::JoinCancelled { session_handle }
            | RoomEvent::GuestDisconnected { session_handle } => {
                if self
                    .controller
                    .handle_cancel_or_disconnect(&session_handle)
                    .is_some()
                {
                    self.sync_host_roster_removal(room_id, &session_handle).await;
                }
            }

            RoomEvent::ApproveRequested {
                requested_by,
                session_handle,
            } => {
                if self.verify_host(room_id, &requested_by).await? {
                    if let Some(approved) = self.controller.approve_guest(&session_handle).await {
                        self.record_member(room_id, &approved).await;
                    }
                }
            }

            RoomEvent::RejectRequested {
                requested_by,
                session_handle,
            } => {
                if self.verify_host(room_id, &requested_by).await? {
                    self.controller.reject_guest(&session_handle).await;
                }
            }

            RoomEvent::ApproveAllRequested { requested_by } => {
                if self.verify_host(room_id, &requested_by).await? {
                    let approved = self.controller.approve_all_guests().await;
                    for request in &approved {
                        self.record_member(room_id, request).await;
                    }
                }
            }

            RoomEvent::WaitingListRequested {
                requested_by,
                session_handle,
            } => {
                if self.verify_host(room_id, &requested_by).await? {
                    let waiting = self.controller.pending_requests().to_vec();
                    let message = WebSocketMessage::waiting_list(waiting);
                    let json = serde_json::to_string(&message).map_err(|e| {
                        RoomEventError::HandlerError(format!("Failed to serialize message: {}", e))
                    })?;
                    self.connections.send_to_session(&session_handle, &json).await;
                }
            }
        }

        Ok(())
    }

    fn handler_name(&self) -> &'static str {
        "admission"
    }
}
