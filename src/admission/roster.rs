use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One guest's outstanding attempt to enter a room
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JoinRequest {
    /// Stable identity of the requesting participant; survives reconnects
    pub guest_id: String,
    /// Display name, for human-facing notifications only
    pub guest_name: String,
    /// Identifier of the live connection that made the request; a guest who
    /// reconnects gets a new one
    pub session_handle: String,
    /// When the host first observed the request
    pub requested_at: DateTime<Utc>,
}

impl JoinRequest {
    pub fn new(guest_id: String, guest_name: String, session_handle: String) -> Self {
        Self {
            guest_id,
            guest_name,
            session_handle,
            requested_at: Utc::now(),
        }
    }
}

/// The host-owned collection of currently pending join requests
///
/// Entries keep arrival order, oldest first. Both the session handle and the
/// guest id are unique within the roster: a request that matches either is a
/// resubmission of an existing entry, never a new one.
#[derive(Debug, Default)]
pub struct PendingRoster {
    entries: Vec<JoinRequest>,
}

impl PendingRoster {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a request, unless one already exists for the same session
    /// handle or guest id. Returns true if the request was added.
    pub fn insert(&mut self, request: JoinRequest) -> bool {
        if self.contains_session(&request.session_handle) || self.contains_guest(&request.guest_id)
        {
            return false;
        }
        self.entries.push(request);
        true
    }

    /// Remove the entry for a session handle, if present
    pub fn remove(&mut self, session_handle: &str) -> Option<JoinRequest> {
        let index = self
            .entries
            .iter()
            .position(|r| r.session_handle == session_handle)?;
        Some(self.entries.remove(index))
    }

    pub fn contains_session(&self, session_handle: &str) -> bool {
        self.entries
            .iter()
            .any(|r| r.session_handle == session_handle)
    }

    pub fn contains_guest(&self, guest_id: &str) -> bool {
        self.entries.iter().any(|r| r.guest_id == guest_id)
    }

    /// Take every pending entry at once, leaving the roster empty
    pub fn drain_all(&mut self) -> Vec<JoinRequest> {
        std::mem::take(&mut self.entries)
    }

    /// Pending entries in arrival order
    pub fn entries(&self) -> &[JoinRequest] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
