//! UI 層（axum サーバー）
//!
//! - `/ws`: チャットトランスポート（WebSocket）
//! - `/api/*`: 運用向けの HTTP API

mod handler;
pub mod operator_notice;
mod server;
mod signal;
pub mod state;

pub use server::Server;
