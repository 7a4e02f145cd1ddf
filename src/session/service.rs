use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    generators::{IdGenerator, NameGenerator, PetNameGenerator, UuidIdGenerator},
    models::SessionModel,
    repository::SessionRepository,
    token::TokenConfig,
    types::{SessionClaims, SessionResponse},
};
use crate::shared::AppError;

/// Service for handling session business logic
pub struct SessionService {
    id_generator: Arc<dyn IdGenerator>,
    name_generator: Arc<dyn NameGenerator>,
    token_config: TokenConfig,
    repository: Arc<dyn SessionRepository + Send + Sync>,
}

impl SessionService {
    pub fn new(repository: Arc<dyn SessionRepository + Send + Sync>) -> Self {
        Self {
            id_generator: Arc::new(UuidIdGenerator::new()),
            name_generator: Arc::new(PetNameGenerator::new()),
            token_config: TokenConfig::new(),
            repository,
        }
    }

    /// Creates a new participant identity with a generated display name and
    /// a JWT session token
    #[instrument(skip(self))]
    pub async fn create_session(&self) -> Result<SessionResponse, AppError> {
        let guest_id = self.id_generator.generate().await;
        let display_name = self.name_generator.generate().await;

        let session = SessionModel::new(
            guest_id.clone(),
            display_name.clone(),
            self.token_config.expiration_days,
        );
        self.repository.create_session(&session).await?;

        let token = self.token_config.create_token(
            session.id.clone(),
            guest_id.clone(),
            display_name.clone(),
        )?;

        info!(
            guest_id = %guest_id,
            display_name = %display_name,
            "Session created successfully"
        );

        Ok(SessionResponse {
            session_token: token,
            guest_id,
            display_name,
        })
    }

    /// Validates a session token and returns the claims if valid
    #[instrument(skip(self, token))]
    pub async fn validate_session(&self, token: &str) -> Result<SessionClaims, AppError> {
        // First validate JWT token structure and signature
        let claims = self.token_config.validate_token(token)?;

        // Then validate the session still exists and hasn't been revoked
        match self.repository.get_session(&claims.session_id).await? {
            Some(session_model) => {
                if session_model.is_expired() {
                    warn!(
                        session_id = %claims.session_id,
                        "Session found but has expired"
                    );
                    return Err(AppError::Unauthorized("Session has expired".to_string()));
                }

                Ok(claims)
            }
            None => {
                warn!(
                    session_id = %claims.session_id,
                    "Session not found - may have been revoked"
                );
                Err(AppError::Unauthorized(
                    "Session not found or has been revoked".to_string(),
                ))
            }
        }
    }

    /// Revokes a session by removing it from the repository
    #[instrument(skip(self))]
    pub async fn revoke_session(&self, session_id: &str) -> Result<(), AppError> {
        info!(session_id = %session_id, "Revoking session");
        self.repository.delete_session(session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::repository::InMemorySessionRepository;

    fn service() -> SessionService {
        SessionService::new(Arc::new(InMemorySessionRepository::new()))
    }

    #[tokio::test]
    async fn test_created_session_validates() {
        let service = service();
        let created = service.create_session().await.unwrap();

        let claims = service
            .validate_session(&created.session_token)
            .await
            .unwrap();
        assert_eq!(claims.guest_id, created.guest_id);
        assert_eq!(claims.display_name, created.display_name);
    }

    #[tokio::test]
    async fn test_revoked_session_no_longer_validates() {
        let service = service();
        let created = service.create_session().await.unwrap();
        let claims = service
            .validate_session(&created.session_token)
            .await
            .unwrap();

        service.revoke_session(&claims.session_id).await.unwrap();

        assert!(matches!(
            service.validate_session(&created.session_token).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let service = service();
        assert!(matches!(
            service.validate_session("not.a.token").await,
            Err(AppError::JwtError(_))
        ));
    }
}
