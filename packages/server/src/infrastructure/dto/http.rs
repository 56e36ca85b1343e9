//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Participant entry in the room detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDetailDto {
    pub user_id: String,
    pub name: String,
}

/// Response of `GET /api/rooms/{room_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub description: String,
    pub admin: String,
    pub participants: Vec<ParticipantDetailDto>,
    pub created_at: String,
}
