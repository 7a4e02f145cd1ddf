use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::SessionModel;
use crate::shared::AppError;

/// Trait for session repository operations
#[async_trait]
pub trait SessionRepository {
    async fn create_session(&self, session: &SessionModel) -> Result<(), AppError>;
    async fn get_session(&self, session_id: &str) -> Result<Option<SessionModel>, AppError>;
    async fn delete_session(&self, session_id: &str) -> Result<(), AppError>;
}

/// In-memory implementation of SessionRepository
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<String, SessionModel>>,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the current number of sessions in the repository
    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    #[instrument(skip(self, session))]
    async fn create_session(&self, session: &SessionModel) -> Result<(), AppError> {
        debug!(session_id = %session.id, guest_id = %session.guest_id, "Creating session in memory");

        let mut sessions = self.sessions.lock().unwrap();
        if sessions.contains_key(&session.id) {
            warn!(session_id = %session.id, "Session already exists in memory");
            return Err(AppError::Conflict("Session already exists".to_string()));
        }
        sessions.insert(session.id.clone(), session.clone());

        debug!(session_id = %session.id, "Session created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_session(&self, session_id: &str) -> Result<Option<SessionModel>, AppError> {
        debug!(session_id = %session_id, "Fetching session from memory");

        let sessions = self.sessions.lock().unwrap();
        let session = sessions.get(session_id).cloned();

        match &session {
            Some(s) => {
                debug!(session_id = %session_id, guest_id = %s.guest_id, "Session found in memory")
            }
            None => debug!(session_id = %session_id, "Session not found in memory"),
        }

        Ok(session)
    }

    #[instrument(skip(self))]
    async fn delete_session(&self, session_id: &str) -> Result<(), AppError> {
        debug!(session_id = %session_id, "Deleting session from memory");

        let mut sessions = self.sessions.lock().unwrap();
        sessions.remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_get_delete_session() {
        let repo = InMemorySessionRepository::new();
        let session = SessionModel::new("g1".to_string(), "happy-cat".to_string(), 7);

        repo.create_session(&session).await.unwrap();
        assert_eq!(repo.session_count(), 1);

        let fetched = repo.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(fetched.guest_id, "g1");

        repo.delete_session(&session.id).await.unwrap();
        assert!(repo.get_session(&session.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_session_is_a_conflict() {
        let repo = InMemorySessionRepository::new();
        let session = SessionModel::new("g1".to_string(), "happy-cat".to_string(), 7);

        repo.create_session(&session).await.unwrap();
        assert!(matches!(
            repo.create_session(&session).await,
            Err(AppError::Conflict(_))
        ));
    }
}
