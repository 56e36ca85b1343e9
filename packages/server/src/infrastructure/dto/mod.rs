//! Data Transfer Objects (DTOs) for the bot.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket frame DTOs (chat transport)
//! - `http`: HTTP API response DTOs
//! - `document`: room store documents (JSON file)

pub mod conversion;
pub mod document;
pub mod http;
pub mod websocket;
