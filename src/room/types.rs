use serde::{Deserialize, Serialize};

/// Response for room creation and room information
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomResponse {
    pub id: String,
    pub host_name: String,
    pub status: String,
    pub member_count: i32,
}
