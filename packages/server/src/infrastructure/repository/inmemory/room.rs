//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! BTreeMap をインメモリのドキュメントストアとして使用します。
//!
//! すべての操作は 1 つの Mutex の中で完結するため、
//! 同じルームへの参加者追加が並行しても更新は失われません。
//! `insert_if_absent` も同じ臨界区間で存在確認と挿入を行うので、ID の確保は原子的です。

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    DisplayName, RepositoryError, Room, RoomId, RoomRepository, RoomSummary, UserId,
};

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// RoomId → Room
    rooms: Mutex<BTreeMap<RoomId, Room>>,
}

impl InMemoryRoomRepository {
    /// 空の InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存のルームから InMemoryRoomRepository を作成
    pub fn with_rooms(rooms: Vec<Room>) -> Self {
        let rooms = rooms.into_iter().map(|room| (room.id.clone(), room)).collect();
        Self {
            rooms: Mutex::new(rooms),
        }
    }

    /// 全ルームのスナップショット（作成日時順）
    pub async fn snapshot(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        sorted(rooms.values())
    }

    /// ルーム数
    pub async fn count(&self) -> usize {
        self.rooms.lock().await.len()
    }
}

/// 作成日時・ID 順に並べて複製する
fn sorted<'a>(rooms: impl Iterator<Item = &'a Room>) -> Vec<Room> {
    let mut rooms: Vec<Room> = rooms.cloned().collect();
    rooms.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    rooms
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn insert_if_absent(&self, room: Room) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.contains_key(&room.id) {
            return Err(RepositoryError::RoomAlreadyExists(room.id.into_string()));
        }
        rooms.insert(room.id.clone(), room);
        Ok(())
    }

    async fn exists(&self, room_id: &RoomId) -> Result<bool, RepositoryError> {
        let rooms = self.rooms.lock().await;
        Ok(rooms.contains_key(room_id))
    }

    async fn get(&self, room_id: &RoomId) -> Result<Option<Room>, RepositoryError> {
        let rooms = self.rooms.lock().await;
        Ok(rooms.get(room_id).cloned())
    }

    async fn upsert_participant(
        &self,
        room_id: &RoomId,
        user_id: UserId,
        name: DisplayName,
    ) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))?;
        room.upsert_participant(user_id, name);
        Ok(())
    }

    async fn find_by_member(&self, user_id: &UserId) -> Result<Vec<Room>, RepositoryError> {
        let rooms = self.rooms.lock().await;
        Ok(sorted(rooms.values().filter(|room| {
            room.is_admin(user_id) || room.is_participant(user_id)
        })))
    }

    async fn find_by_admin(&self, admin: &UserId) -> Result<Vec<RoomSummary>, RepositoryError> {
        let rooms = self.rooms.lock().await;
        Ok(sorted(rooms.values().filter(|room| room.is_admin(admin)))
            .iter()
            .map(Room::summary)
            .collect())
    }

    async fn find_pairable_by_admin(
        &self,
        admin: &UserId,
    ) -> Result<Vec<RoomSummary>, RepositoryError> {
        let rooms = self.rooms.lock().await;
        Ok(
            sorted(rooms.values().filter(|room| room.is_admin(admin) && room.is_pairable()))
                .iter()
                .map(Room::summary)
                .collect(),
        )
    }

    async fn delete(&self, room_id: &RoomId) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        rooms.remove(room_id);
        Ok(())
    }
}
