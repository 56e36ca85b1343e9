//! UseCase: ルーム情報の取得

use std::sync::Arc;

use crate::domain::{Room, RoomId, RoomRepository, UserId};

use super::error::RoomInfoError;

/// ルーム情報取得のユースケース
pub struct RoomInfoUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl RoomInfoUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ユーザーが所属する（管理者または参加者の）ルーム一覧
    pub async fn rooms_of(&self, user: &UserId) -> Result<Vec<Room>, RoomInfoError> {
        Ok(self.repository.find_by_member(user).await?)
    }

    /// ID を指定してルームを取得
    pub async fn room_detail(&self, raw_room_id: &str) -> Result<Room, RoomInfoError> {
        let not_found = || RoomInfoError::RoomNotFound(raw_room_id.to_string());
        let room_id = RoomId::new(raw_room_id.to_string()).map_err(|_| not_found())?;
        self.repository.get(&room_id).await?.ok_or_else(not_found)
    }
}
