//! UseCase: ルーム参加
//!
//! 参加は 2 段階です。
//!
//! 1. `prepare`: 参加リンクの引数を検証し、参加可能なルームか確認する
//! 2. `execute`: 表示名を受け取り、参加者として登録する
//!
//! 2 つの段階の間にルームが削除されることがあるため、`execute` でも存在を確認します。

use std::sync::Arc;

use crate::domain::{DisplayName, Room, RoomId, RoomRepository, UserId};

use super::error::JoinRoomError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl JoinRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 参加リンクの引数を検証する
    ///
    /// # Returns
    ///
    /// * `Ok(RoomId)` - 参加可能なルーム
    /// * `Err(JoinRoomError::InvalidRoomId)` - 4 桁の数字でない
    /// * `Err(JoinRoomError::RoomNotFound)` - ルームが存在しない
    /// * `Err(JoinRoomError::AlreadyParticipant)` - 既に参加している（管理者を含む）
    pub async fn prepare(&self, raw_room_id: &str, user: &UserId) -> Result<RoomId, JoinRoomError> {
        let room_id = RoomId::new(raw_room_id.trim().to_string())
            .map_err(|_| JoinRoomError::InvalidRoomId(raw_room_id.to_string()))?;

        let room = self
            .repository
            .get(&room_id)
            .await?
            .ok_or_else(|| JoinRoomError::RoomNotFound(room_id.as_str().to_string()))?;

        if room.is_participant(user) {
            return Err(JoinRoomError::AlreadyParticipant(
                room_id.as_str().to_string(),
            ));
        }

        Ok(room_id)
    }

    /// 参加者として登録し、登録後のルームを返す
    ///
    /// 既に参加している場合は表示名の更新になる（重複は作らない）
    pub async fn execute(
        &self,
        room_id: &RoomId,
        user: UserId,
        name: DisplayName,
    ) -> Result<Room, JoinRoomError> {
        self.repository
            .upsert_participant(room_id, user.clone(), name)
            .await?;

        let room = self
            .repository
            .get(room_id)
            .await?
            .ok_or_else(|| JoinRoomError::RoomNotFound(room_id.as_str().to_string()))?;

        tracing::info!(
            "'{}' joined room {} ({} participants)",
            user,
            room_id,
            room.participant_count()
        );
        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RoomDescription, Timestamp},
        infrastructure::repository::InMemoryRoomRepository,
    };

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value.to_string()).unwrap()
    }

    fn room_id(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    fn create_test_usecase() -> (JoinRoomUseCase, Arc<InMemoryRoomRepository>) {
        let room = Room::new(
            room_id("4821"),
            RoomDescription::new("Office party".to_string()).unwrap(),
            user("alice"),
            name("Alice"),
            Timestamp::new(0),
        );
        let repository = Arc::new(InMemoryRoomRepository::with_rooms(vec![room]));
        (JoinRoomUseCase::new(repository.clone()), repository)
    }

    #[tokio::test]
    async fn test_prepare_accepts_new_participant() {
        // テスト項目: 未参加のユーザーは参加できる
        // given (前提条件):
        let (usecase, _repository) = create_test_usecase();

        // when (操作):
        let result = usecase.prepare(" 4821 ", &user("bob")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(room_id("4821")));
    }

    #[tokio::test]
    async fn test_prepare_rejects_malformed_and_missing_rooms() {
        // テスト項目: 不正な ID と存在しないルームは拒否される
        // given (前提条件):
        let (usecase, _repository) = create_test_usecase();

        // when (操作):
        let malformed = usecase.prepare("48a1", &user("bob")).await;
        let missing = usecase.prepare("1234", &user("bob")).await;

        // then (期待する結果):
        assert_eq!(
            malformed,
            Err(JoinRoomError::InvalidRoomId("48a1".to_string()))
        );
        assert_eq!(missing, Err(JoinRoomError::RoomNotFound("1234".to_string())));
    }

    #[tokio::test]
    async fn test_prepare_rejects_existing_participants() {
        // テスト項目: 既存の参加者（管理者を含む）は再参加できない
        // given (前提条件):
        let (usecase, _repository) = create_test_usecase();
        usecase
            .execute(&room_id("4821"), user("bob"), name("Bo"))
            .await
            .unwrap();

        // when (操作):
        let bob = usecase.prepare("4821", &user("bob")).await;
        let admin = usecase.prepare("4821", &user("alice")).await;

        // then (期待する結果):
        assert_eq!(
            bob,
            Err(JoinRoomError::AlreadyParticipant("4821".to_string()))
        );
        assert_eq!(
            admin,
            Err(JoinRoomError::AlreadyParticipant("4821".to_string()))
        );
    }

    #[tokio::test]
    async fn test_execute_appends_participant() {
        // テスト項目: 参加者が末尾に追加され、更新後のルームが返る
        // given (前提条件):
        let (usecase, _repository) = create_test_usecase();

        // when (操作):
        let room = usecase
            .execute(&room_id("4821"), user("bob"), name("Bo"))
            .await
            .unwrap();

        // then (期待する結果):
        let participants = room.participants();
        assert_eq!(participants.len(), 2);
        assert_eq!(participants[1].id, user("bob"));
        assert_eq!(participants[1].name, name("Bo"));
    }

    #[tokio::test]
    async fn test_execute_on_deleted_room() {
        // テスト項目: 名前入力中にルームが削除された場合は RoomNotFound
        // given (前提条件):
        let (usecase, repository) = create_test_usecase();
        repository.delete(&room_id("4821")).await.unwrap();

        // when (操作):
        let result = usecase
            .execute(&room_id("4821"), user("bob"), name("Bo"))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(JoinRoomError::RoomNotFound("4821".to_string())));
    }
}
