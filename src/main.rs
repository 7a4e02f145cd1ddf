mod admission;
mod event;
mod room;
mod session;
mod shared;
mod websockets;

use axum::{
    routing::{get, post},
    Router,
};
use event::EventBus;
use room::repository::InMemoryRoomRepository;
use room::service::RoomService;
use session::repository::InMemorySessionRepository;
use session::service::SessionService;
use shared::AppState;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use websockets::InMemoryConnectionManager;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anteroom=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting admission control server");

    // Create shared application state with dependency injection
    let session_repository = Arc::new(InMemorySessionRepository::new());
    let room_repository = Arc::new(InMemoryRoomRepository::new());
    let connection_manager = Arc::new(InMemoryConnectionManager::new());
    let event_bus = EventBus::new();

    let session_service = Arc::new(SessionService::new(session_repository));
    let room_service = Arc::new(RoomService::new(room_repository));
    let admission = Arc::new(admission::AdmissionSubscriptions::new(
        event_bus.clone(),
        room_service.clone(),
        connection_manager.clone(),
    ));

    let app_state = AppState::new(
        session_service,
        room_service,
        connection_manager,
        event_bus,
        admission,
    );

    // build our application
    let app = Router::new()
        .route("/", get(|| async { "Hello, World!" }))
        .route("/session", post(session::create_session))
        .route("/rooms", post(room::create_room).get(room::list_rooms))
        .route("/rooms/:room_id", get(room::get_room))
        .route("/ws/:room_id", get(websockets::websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // run our app with hyper
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .unwrap();
    info!("Server running on http://localhost:{}", port);
    axum::serve(listener, app).await.unwrap();
}
