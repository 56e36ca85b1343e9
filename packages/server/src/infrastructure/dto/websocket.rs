//! WebSocket frame DTOs.
//!
//! Client → server frames are tagged by `type` (`text` / `callback`).
//! Server → client frames are notifications with optional inline buttons.

use serde::{Deserialize, Serialize};

/// Frame sent by a chat client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Free text or a `/command`
    Text { text: String },
    /// Inline button pressed (carries the button's data)
    Callback { data: String },
}

/// Message type of server → client frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Notification,
}

/// Inline button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonDto {
    pub label: String,
    pub data: String,
}

/// Notification pushed to a chat client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub r#type: MessageType,
    pub message_id: String,
    pub text: String,
    #[serde(default)]
    pub buttons: Vec<ButtonDto>,
    #[serde(default)]
    pub pinned: bool,
}
