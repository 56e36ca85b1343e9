//! UseCase: ルーム削除

use std::sync::Arc;

use crate::domain::{RoomId, RoomRepository, RoomSummary, UserId};

use super::error::DeleteRoomError;

/// ルーム削除のユースケース
pub struct DeleteRoomUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl DeleteRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 削除候補（ユーザーが管理者のルーム）
    pub async fn deletable_rooms(&self, admin: &UserId) -> Result<Vec<RoomSummary>, DeleteRoomError> {
        Ok(self.repository.find_by_admin(admin).await?)
    }

    /// ルームを削除
    ///
    /// 既に存在しない場合は何もせず成功する。管理者以外からの要求は `NotAdmin`。
    pub async fn execute(&self, room_id: &RoomId, requester: &UserId) -> Result<(), DeleteRoomError> {
        let Some(room) = self.repository.get(room_id).await? else {
            tracing::debug!("Room {} is already gone, nothing to delete", room_id);
            return Ok(());
        };

        if !room.is_admin(requester) {
            return Err(DeleteRoomError::NotAdmin(room_id.as_str().to_string()));
        }

        self.repository.delete(room_id).await?;
        tracing::info!("Room {} deleted by '{}'", room_id, requester);
        Ok(())
    }
}
