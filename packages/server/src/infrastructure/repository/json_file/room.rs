//! JSON ファイル Room Repository 実装
//!
//! インメモリのテーブル（`InMemoryRoomRepository`）を正とし、
//! 変更のたびにストア全体を JSON ファイルへ書き出します。
//!
//! ```text
//! JSON → RoomDocument (DTO) → Room (ドメインモデル)
//! ```
//!
//! 変更後の内容を先にファイルへ書き出し、成功した場合だけテーブルに反映します。
//! 書き出しに失敗した変更はテーブルにも残りません。
//!
//! 書き出しは `<path>.tmp` に書いてから rename するので、途中で落ちても
//! 直前の内容か新しい内容のどちらかが残ります。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{DisplayName, RepositoryError, Room, RoomId, RoomRepository, RoomSummary, UserId},
    infrastructure::{
        dto::document::{RoomDocument, RoomStoreDocument},
        repository::InMemoryRoomRepository,
    },
};

/// JSON ファイルに永続化する Room Repository
pub struct JsonFileRoomRepository {
    path: PathBuf,
    table: InMemoryRoomRepository,
    /// 変更と書き出しを直列化するためのロック
    write_lock: Mutex<()>,
}

impl JsonFileRoomRepository {
    /// ファイルからストアを開く（ファイルがなければ空のストア）
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();

        let rooms = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let document: RoomStoreDocument = serde_json::from_slice(&bytes)
                    .map_err(|e| storage_error(&path, e))?;
                document
                    .rooms
                    .into_iter()
                    .map(Room::try_from)
                    .collect::<Result<Vec<_>, _>>()?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(storage_error(&path, e)),
        };

        tracing::info!("Loaded {} room(s) from {}", rooms.len(), path.display());

        Ok(Self {
            path,
            table: InMemoryRoomRepository::with_rooms(rooms),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ルーム一覧をファイルへ書き出す
    async fn write_document(&self, rooms: &[Room]) -> Result<(), RepositoryError> {
        let document = RoomStoreDocument {
            rooms: rooms.iter().map(RoomDocument::from).collect(),
        };
        let bytes =
            serde_json::to_vec_pretty(&document).map_err(|e| storage_error(&self.path, e))?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, bytes)
            .await
            .map_err(|e| storage_error(&tmp_path, e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| storage_error(&self.path, e))?;

        tracing::debug!("Room store flushed to {}", self.path.display());
        Ok(())
    }
}

fn storage_error(path: &Path, error: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Storage(format!("{}: {}", path.display(), error))
}

#[async_trait]
impl RoomRepository for JsonFileRoomRepository {
    async fn insert_if_absent(&self, room: Room) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        if self.table.exists(&room.id).await? {
            return Err(RepositoryError::RoomAlreadyExists(room.id.into_string()));
        }

        let mut rooms = self.table.snapshot().await;
        rooms.push(room.clone());
        self.write_document(&rooms).await?;

        self.table.insert_if_absent(room).await
    }

    async fn exists(&self, room_id: &RoomId) -> Result<bool, RepositoryError> {
        self.table.exists(room_id).await
    }

    async fn get(&self, room_id: &RoomId) -> Result<Option<Room>, RepositoryError> {
        self.table.get(room_id).await
    }

    async fn upsert_participant(
        &self,
        room_id: &RoomId,
        user_id: UserId,
        name: DisplayName,
    ) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut updated = self
            .table
            .get(room_id)
            .await?
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))?;
        updated.upsert_participant(user_id.clone(), name.clone());

        let rooms: Vec<Room> = self
            .table
            .snapshot()
            .await
            .into_iter()
            .map(|room| if room.id == *room_id { updated.clone() } else { room })
            .collect();
        self.write_document(&rooms).await?;

        self.table.upsert_participant(room_id, user_id, name).await
    }

    async fn find_by_member(&self, user_id: &UserId) -> Result<Vec<Room>, RepositoryError> {
        self.table.find_by_member(user_id).await
    }

    async fn find_by_admin(&self, admin: &UserId) -> Result<Vec<RoomSummary>, RepositoryError> {
        self.table.find_by_admin(admin).await
    }

    async fn find_pairable_by_admin(
        &self,
        admin: &UserId,
    ) -> Result<Vec<RoomSummary>, RepositoryError> {
        self.table.find_pairable_by_admin(admin).await
    }

    async fn delete(&self, room_id: &RoomId) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        if !self.table.exists(room_id).await? {
            return Ok(());
        }

        let mut rooms = self.table.snapshot().await;
        rooms.retain(|room| room.id != *room_id);
        self.write_document(&rooms).await?;

        self.table.delete(room_id).await
    }
}
