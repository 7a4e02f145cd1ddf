use serde::{Deserialize, Serialize};

/// In-memory model for a live room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomModel {
    pub id: String,              // Random pet name generated ID
    pub host_id: String,         // Guest id of the room's host
    pub host_name: String,       // Host display name
    pub status: String,          // "ONLINE" or "OFFLINE"
    pub member_ids: Vec<String>, // Guest ids already admitted to this room
}

impl RoomModel {
    /// Creates a new room model with generated ID
    ///
    /// The host is a member from the start; everyone else arrives through
    /// the waiting room.
    pub fn new(host_id: String, host_name: String) -> Self {
        let room_id = petname::Petnames::default().generate_one(2, "");

        Self {
            id: room_id,
            host_id: host_id.clone(),
            host_name,
            status: "ONLINE".to_string(),
            member_ids: vec![host_id],
        }
    }

    pub fn member_count(&self) -> i32 {
        self.member_ids.len() as i32
    }

    /// Check if a participant has been admitted to this room (by guest id)
    pub fn has_member(&self, guest_id: &str) -> bool {
        self.member_ids.contains(&guest_id.to_string())
    }

    pub fn is_host(&self, guest_id: &str) -> bool {
        self.host_id == guest_id
    }

    /// Record an admitted participant
    pub fn add_member(&mut self, guest_id: String) {
        if !self.has_member(&guest_id) {
            self.member_ids.push(guest_id);
        }
    }

    /// Remove a participant from the room
    pub fn remove_member(&mut self, guest_id: &str) {
        self.member_ids.retain(|m| m != guest_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_room_has_host_as_member() {
        let room = RoomModel::new("h1".to_string(), "host-name".to_string());
        assert!(!room.id.is_empty());
        assert!(room.is_host("h1"));
        assert!(room.has_member("h1"));
        assert_eq!(room.member_count(), 1);
        assert_eq!(room.status, "ONLINE");
    }

    #[test]
    fn test_add_member_is_idempotent() {
        let mut room = RoomModel::new("h1".to_string(), "host-name".to_string());
        room.add_member("g1".to_string());
        room.add_member("g1".to_string());
        assert_eq!(room.member_count(), 2);
        assert!(room.has_member("g1"));
    }

    #[test]
    fn test_remove_member() {
        let mut room = RoomModel::new("h1".to_string(), "host-name".to_string());
        room.add_member("g1".to_string());
        room.remove_member("g1");
        assert!(!room.has_member("g1"));
    }
}
