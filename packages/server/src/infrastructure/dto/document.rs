//! ルームストアのドキュメント DTO
//!
//! JSON ファイルに保存する形式です。participants はオブジェクトのキー順で参加順を表します。
//!
//! ```json
//! {
//!   "rooms": [
//!     {
//!       "room_id": "4821",
//!       "description": "Office party",
//!       "admin": "1001",
//!       "participants": { "1001": "Alice", "1002": "Bo" },
//!       "created_at": 1672498800000
//!     }
//!   ]
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// ストア全体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStoreDocument {
    #[serde(default)]
    pub rooms: Vec<RoomDocument>,
}

/// 1 ルーム分のドキュメント
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDocument {
    pub room_id: String,
    pub description: String,
    pub admin: String,
    pub participants: IndexMap<String, String>,
    pub created_at: i64,
}
