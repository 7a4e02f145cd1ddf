use axum::{extract::State, Json};
use tracing::{info, instrument};

use super::types::SessionResponse;
use crate::shared::{AppError, AppState};

/// HTTP handler for creating a new session
///
/// POST /session
/// Returns a JWT session token, a stable guest id, and a generated display name
#[instrument(name = "create_session", skip(state))]
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.session_service.create_session().await?;

    info!(
        guest_id = %session.guest_id,
        display_name = %session.display_name,
        "Session created successfully"
    );

    Ok(Json(session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    #[tokio::test]
    async fn test_create_session_handler() {
        let app_state = AppStateBuilder::new().build();

        let app = Router::new()
            .route("/session", axum::routing::post(create_session))
            .with_state(app_state);

        let request = Request::builder()
            .method("POST")
            .uri("/session")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let session_response: SessionResponse = serde_json::from_slice(&body).unwrap();

        assert!(!session_response.session_token.is_empty());
        assert!(!session_response.guest_id.is_empty());
        assert!(session_response.display_name.contains('-')); // Pet names have dashes
    }
}
