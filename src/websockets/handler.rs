use async_trait::async_trait;
use axum::{
    extract::{Path, State, WebSocketUpgrade},
    http::HeaderMap,
    response::Response,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::event::{EventBus, RoomEvent};
use crate::shared::{AppError, AppState};
use crate::websockets::messages::{MessageType, WebSocketMessage};

use super::socket::{Connection, ConnectionContext, MessageHandler};

/// Message handler for receiving WebSocket messages from the client
///
/// Translates wire messages into room events. The sender's identity and
/// session handle come from the connection context, never from the payload.
pub struct WebsocketReceiveHandler {
    event_bus: EventBus,
}

impl WebsocketReceiveHandler {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, ctx: &ConnectionContext, message: String) {
        debug!(
            guest_id = %ctx.guest_id,
            session_handle = %ctx.session_handle,
            room_id = %ctx.room_id,
            message = %message,
            "Received message"
        );

        match serde_json::from_str::<WebSocketMessage>(&message) {
            Ok(ws_message) => match ws_message.message_type {
                MessageType::JoinRequest => {
                    self.event_bus
                        .emit_to_room(
                            &ctx.room_id,
                            RoomEvent::JoinRequested {
                                guest_id: ctx.guest_id.clone(),
                                guest_name: ctx.guest_name.clone(),
                                session_handle: ctx.session_handle.clone(),
                            },
                        )
                        .await;
                }
                MessageType::CancelJoinRequest => {
                    self.event_bus
                        .emit_to_room(
                            &ctx.room_id,
                            RoomEvent::JoinCancelled {
                                session_handle: ctx.session_handle.clone(),
                            },
                        )
                        .await;
                }
                MessageType::ApproveGuest => {
                    if let Some(session_handle) = ws_message
                        .payload
                        .get("session_handle")
                        .and_then(|v| v.as_str())
                    {
                        self.event_bus
                            .emit_to_room(
                                &ctx.room_id,
                                RoomEvent::ApproveRequested {
                                    requested_by: ctx.guest_id.clone(),
                                    session_handle: session_handle.to_string(),
                                },
                            )
                            .await;
                    } else {
                        warn!(
                            guest_id = %ctx.guest_id,
                            room_id = %ctx.room_id,
                            "APPROVE_GUEST missing session_handle"
                        );
                    }
                }
                MessageType::RejectGuest => {
                    if let Some(session_handle) = ws_message
                        .payload
                        .get("session_handle")
                        .and_then(|v| v.as_str())
                    {
                        self.event_bus
                            .emit_to_room(
                                &ctx.room_id,
                                RoomEvent::RejectRequested {
                                    requested_by: ctx.guest_id.clone(),
                                    session_handle: session_handle.to_string(),
                                },
                            )
                            .await;
                    } else {
                        warn!(
                            guest_id = %ctx.guest_id,
                            room_id = %ctx.room_id,
                            "REJECT_GUEST missing session_handle"
                        );
                    }
                }
                MessageType::ApproveAllGuests => {
                    self.event_bus
                        .emit_to_room(
                            &ctx.room_id,
                            RoomEvent::ApproveAllRequested {
                                requested_by: ctx.guest_id.clone(),
                            },
                        )
                        .await;
                }
                MessageType::ListWaiting => {
                    self.event_bus
                        .emit_to_room(
                            &ctx.room_id,
                            RoomEvent::WaitingListRequested {
                                requested_by: ctx.guest_id.clone(),
                                session_handle: ctx.session_handle.clone(),
                            },
                        )
                        .await;
                }
                _ => {
                    debug!(
                        message_type = ?ws_message.message_type,
                        "Unhandled message type"
                    );
                }
            },
            Err(e) => {
                warn!(
                    guest_id = %ctx.guest_id,
                    room_id = %ctx.room_id,
                    error = %e,
                    "Failed to parse WebSocket message"
                );
            }
        }
    }
}

/// WebSocket endpoint that handles authentication via Sec-WebSocket-Protocol header
/// GET /ws/{room_id} with JWT token in Sec-WebSocket-Protocol header
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Path(room_id): Path<String>,
    headers: HeaderMap,
    State(app_state): State<AppState>,
) -> Result<Response, AppError> {
    info!(
        room_id = %room_id,
        "WebSocket connection requested"
    );

    // Extract JWT from Sec-WebSocket-Protocol header
    let jwt_token = headers
        .get("sec-websocket-protocol")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing or invalid Sec-WebSocket-Protocol header");
            AppError::Unauthorized("Missing authentication token".to_string())
        })?;

    // Validate JWT token and resolve the participant identity from claims
    let claims = app_state
        .session_service
        .validate_session(jwt_token)
        .await?;

    info!(
        room_id = %room_id,
        guest_id = %claims.guest_id,
        "WebSocket authentication successful"
    );

    // Verify room exists using room service
    let room_option = app_state.room_service.get_room(&room_id).await?;
    if room_option.is_none() {
        warn!(
            room_id = %room_id,
            "Room not found, rejecting WebSocket connection"
        );
        return Err(AppError::NotFound("Room not found".to_string()));
    }

    // Every upgrade gets a fresh session handle; a guest that reconnects is
    // a new session even though its guest id is unchanged
    let ctx = ConnectionContext {
        guest_id: claims.guest_id,
        guest_name: claims.display_name,
        session_handle: Uuid::new_v4().to_string(),
        room_id,
    };

    info!(
        room_id = %ctx.room_id,
        guest_id = %ctx.guest_id,
        session_handle = %ctx.session_handle,
        "Room verified, establishing WebSocket connection"
    );
    Ok(ws.on_upgrade(move |socket| handle_websocket_connection(socket, ctx, app_state)))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(
    socket: axum::extract::ws::WebSocket,
    ctx: ConnectionContext,
    app_state: AppState,
) {
    info!(
        room_id = %ctx.room_id,
        guest_id = %ctx.guest_id,
        session_handle = %ctx.session_handle,
        "WebSocket connection established"
    );

    // Create the outbound channel (app -> client)
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();

    app_state
        .connection_manager
        .add_connection(
            ctx.session_handle.clone(),
            ctx.guest_id.clone(),
            outbound_sender,
        )
        .await;

    // Wrap the axum WebSocket in our simple interface
    let socket_wrapper = Box::new(socket);

    let message_handler = Arc::new(WebsocketReceiveHandler::new(app_state.event_bus.clone()));

    let connection = Connection::new(
        ctx.clone(),
        socket_wrapper,
        outbound_receiver,
        message_handler,
    );

    // Run the connection until disconnect
    match connection.run().await {
        Ok(()) => {
            info!(
                room_id = %ctx.room_id,
                session_handle = %ctx.session_handle,
                "WebSocket connection closed cleanly"
            );
        }
        Err(e) => {
            warn!(
                room_id = %ctx.room_id,
                session_handle = %ctx.session_handle,
                error = ?e,
                "WebSocket connection error"
            );
        }
    }

    // Cleanup: remove from connection manager, then let the room know the
    // session is gone so a pending request can be swept from the roster
    app_state
        .connection_manager
        .remove_connection(&ctx.session_handle)
        .await;

    app_state
        .event_bus
        .emit_to_room(
            &ctx.room_id,
            RoomEvent::GuestDisconnected {
                session_handle: ctx.session_handle.clone(),
            },
        )
        .await;

    debug!(
        room_id = %ctx.room_id,
        session_handle = %ctx.session_handle,
        "Connection cleanup complete"
    );
}
