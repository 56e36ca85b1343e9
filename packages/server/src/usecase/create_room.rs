//! UseCase: ルーム作成
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateRoomUseCase::execute() メソッド
//! - 候補 ID の衝突時のリトライと、試行回数の上限
//!
//! ### なぜこのテストが必要か
//! - ルーム ID は 4 桁しかないため衝突が現実的に起こる
//! - 「存在確認してから挿入」ではなく `insert_if_absent` で確保することを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：空いている ID でルームが作成され、管理者が最初の参加者になる
//! - 衝突：最初の候補が使用中なら別の ID で作成される
//! - 異常系：すべての候補が使用中なら CapacityExhausted

use std::sync::{Arc, Mutex};

use hohoho_shared::time::Clock;
use rand::{SeedableRng, rngs::StdRng};

use crate::domain::{
    DisplayName, RepositoryError, Room, RoomDescription, RoomId, RoomIdFactory, RoomRepository,
    Timestamp, UserId,
};

use super::error::CreateRoomError;

/// ID 確保の試行回数の既定値
pub const DEFAULT_MAX_ID_ATTEMPTS: usize = 64;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
    max_attempts: usize,
    /// 候補 ID の乱数源
    rng: Mutex<StdRng>,
}

impl CreateRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>, max_attempts: usize) -> Self {
        Self::with_rng(repository, clock, max_attempts, StdRng::from_entropy())
    }

    /// 乱数源を指定して作成（テストで候補列を固定するため）
    pub fn with_rng(
        repository: Arc<dyn RoomRepository>,
        clock: Arc<dyn Clock>,
        max_attempts: usize,
        rng: StdRng,
    ) -> Self {
        Self {
            repository,
            clock,
            max_attempts,
            rng: Mutex::new(rng),
        }
    }

    /// ルームを作成
    ///
    /// # Arguments
    ///
    /// * `description` - ルームの説明
    /// * `admin` - 作成者（管理者かつ最初の参加者）
    /// * `admin_name` - 作成者の表示名
    ///
    /// # Returns
    ///
    /// * `Ok(RoomId)` - 確保したルーム ID
    /// * `Err(CreateRoomError::CapacityExhausted)` - 規定回数内に空き ID が見つからなかった
    pub async fn execute(
        &self,
        description: RoomDescription,
        admin: UserId,
        admin_name: DisplayName,
    ) -> Result<RoomId, CreateRoomError> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.next_candidate()?;
            let room = Room::new(
                candidate.clone(),
                description.clone(),
                admin.clone(),
                admin_name.clone(),
                Timestamp::new(self.clock.now_jst_millis()),
            );

            match self.repository.insert_if_absent(room).await {
                Ok(()) => {
                    tracing::info!(
                        "Room {} created by '{}' (attempt {})",
                        candidate,
                        admin,
                        attempt
                    );
                    return Ok(candidate);
                }
                Err(RepositoryError::RoomAlreadyExists(_)) => {
                    tracing::debug!("Room ID {} is taken, retrying", candidate);
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::error!(
            "Could not allocate a room ID for '{}' after {} attempts",
            admin,
            self.max_attempts
        );
        Err(CreateRoomError::CapacityExhausted(self.max_attempts))
    }

    fn next_candidate(&self) -> Result<RoomId, CreateRoomError> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(RoomIdFactory::generate_with(&mut *rng)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::factory::{ROOM_ID_MAX, ROOM_ID_MIN},
        infrastructure::repository::InMemoryRoomRepository,
    };
    use hohoho_shared::time::FixedClock;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value.to_string()).unwrap()
    }

    fn description(value: &str) -> RoomDescription {
        RoomDescription::new(value.to_string()).unwrap()
    }

    fn placeholder_room(id: RoomId) -> Room {
        Room::new(
            id,
            description("taken"),
            user("someone"),
            name("Someone"),
            Timestamp::new(0),
        )
    }

    #[tokio::test]
    async fn test_create_room_success() {
        // テスト項目: ルームが作成され、管理者が最初の参加者になる
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = CreateRoomUseCase::new(
            repository.clone(),
            Arc::new(FixedClock::new(1_700_000_000_000)),
            DEFAULT_MAX_ID_ATTEMPTS,
        );

        // when (操作):
        let room_id = usecase
            .execute(description("Office party"), user("alice"), name("Alice"))
            .await
            .unwrap();

        // then (期待する結果):
        let room = repository.get(&room_id).await.unwrap().unwrap();
        assert_eq!(room.admin, user("alice"));
        assert_eq!(room.participants()[0].id, user("alice"));
        assert_eq!(room.description.as_str(), "Office party");
        assert_eq!(room.created_at, Timestamp::new(1_700_000_000_000));
    }

    #[tokio::test]
    async fn test_create_room_retries_on_collision() {
        // テスト項目: 最初の候補が使用中なら別の ID で作成される
        // given (前提条件): 同じシードの乱数で最初の候補を予測し、事前に埋めておく
        let seed = 42;
        let first_candidate =
            RoomIdFactory::generate_with(&mut StdRng::seed_from_u64(seed)).unwrap();
        let repository = Arc::new(InMemoryRoomRepository::with_rooms(vec![placeholder_room(
            first_candidate.clone(),
        )]));
        let usecase = CreateRoomUseCase::with_rng(
            repository.clone(),
            Arc::new(FixedClock::new(0)),
            DEFAULT_MAX_ID_ATTEMPTS,
            StdRng::seed_from_u64(seed),
        );

        // when (操作):
        let room_id = usecase
            .execute(description("Office party"), user("alice"), name("Alice"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_ne!(room_id, first_candidate);
        assert_eq!(repository.count().await, 2);
        let existing = repository.get(&first_candidate).await.unwrap().unwrap();
        assert_eq!(existing.admin, user("someone"));
    }

    #[tokio::test]
    async fn test_create_room_capacity_exhausted() {
        // テスト項目: すべての ID が使用中なら CapacityExhausted を返す
        // given (前提条件):
        let rooms = (ROOM_ID_MIN..=ROOM_ID_MAX)
            .map(|n| placeholder_room(RoomId::from_number(n).unwrap()))
            .collect();
        let repository = Arc::new(InMemoryRoomRepository::with_rooms(rooms));
        let usecase = CreateRoomUseCase::new(repository.clone(), Arc::new(FixedClock::new(0)), 8);

        // when (操作):
        let result = usecase
            .execute(description("Office party"), user("alice"), name("Alice"))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(CreateRoomError::CapacityExhausted(8)));
        assert_eq!(
            repository.count().await,
            usize::from(ROOM_ID_MAX - ROOM_ID_MIN + 1)
        );
    }

    #[tokio::test]
    async fn test_concurrent_creations_get_distinct_ids() {
        // テスト項目: 同時に作成しても ID は重複しない
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = Arc::new(CreateRoomUseCase::new(
            repository.clone(),
            Arc::new(FixedClock::new(0)),
            DEFAULT_MAX_ID_ATTEMPTS,
        ));

        // when (操作):
        let handles: Vec<_> = (0..100)
            .map(|i| {
                let usecase = usecase.clone();
                tokio::spawn(async move {
                    usecase
                        .execute(
                            description("Party"),
                            user(&format!("user-{i}")),
                            name("Someone"),
                        )
                        .await
                })
            })
            .collect();
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }

        // then (期待する結果):
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 100);
        assert_eq!(repository.count().await, 100);
    }
}
