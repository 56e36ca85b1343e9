//! Repository 実装
//!
//! - `inmemory`: プロセス内のみで保持する実装（ルーム・セッション）
//! - `json_file`: ルームを JSON ファイルに永続化する実装

pub mod inmemory;
pub mod json_file;

pub use inmemory::{InMemoryRoomRepository, InMemorySessionRepository};
pub use json_file::JsonFileRoomRepository;
