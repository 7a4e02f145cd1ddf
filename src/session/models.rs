use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Model for a participant identity session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionModel {
    pub id: String,           // UUID v4 as string
    pub guest_id: String,     // Stable participant identity, survives reconnects
    pub display_name: String, // Auto-generated pet name
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionModel {
    /// Creates a new session model with generated ID and timestamps
    pub fn new(guest_id: String, display_name: String, expiration_days: i64) -> Self {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(expiration_days);

        Self {
            id: Uuid::new_v4().to_string(),
            guest_id,
            display_name,
            created_at: now,
            expires_at,
        }
    }

    /// Checks if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
