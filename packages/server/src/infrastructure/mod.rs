//! Infrastructure 層
//!
//! - `dto`: 外部形式（WebSocket フレーム、HTTP レスポンス、JSON ドキュメント）
//! - `message_pusher`: MessagePusher の実装
//! - `repository`: Repository の実装

pub mod dto;
pub mod message_pusher;
pub mod repository;
