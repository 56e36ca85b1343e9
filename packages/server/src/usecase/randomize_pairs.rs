//! UseCase: ペア決め
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RandomizePairsUseCase::execute() メソッド
//! - 参加者全員にピン留めの通知が 1 通ずつ届くこと
//! - 一部の配信失敗でペア決めが取り消されないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 人のルームで互いが相手を担当する
//! - 部分失敗：1 人に届かなくても残りには届き、レポートに失敗が残る
//! - 異常系：参加者 1 人のルームでは通知を 1 通も送らない

use std::sync::Arc;

use crate::domain::{
    Assignment, Participant, RoomId, RoomRepository, RoomSummary, UserId, pair,
};

use super::{
    error::RandomizePairsError,
    messages,
    notify::{DeliveryReport, Notification, NotificationDispatcher},
};

/// ペア決めの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingOutcome {
    pub room_id: RoomId,
    pub assignments: Vec<Assignment>,
    pub report: DeliveryReport,
}

/// ペア決めのユースケース
pub struct RandomizePairsUseCase {
    repository: Arc<dyn RoomRepository>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl RandomizePairsUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            repository,
            dispatcher,
        }
    }

    /// ペア決め候補（ユーザーが管理者で、参加者 2 人以上のルーム）
    pub async fn pairable_rooms(
        &self,
        admin: &UserId,
    ) -> Result<Vec<RoomSummary>, RandomizePairsError> {
        Ok(self.repository.find_pairable_by_admin(admin).await?)
    }

    /// ペアを決めて、各送り主に担当相手をピン留めで通知する
    ///
    /// 通知の失敗はレポートに集約され、ペア決め自体は取り消されない
    pub async fn execute(
        &self,
        room_id: &RoomId,
        requester: &UserId,
    ) -> Result<PairingOutcome, RandomizePairsError> {
        let room = self
            .repository
            .get(room_id)
            .await?
            .ok_or_else(|| RandomizePairsError::RoomNotFound(room_id.as_str().to_string()))?;

        if !room.is_admin(requester) {
            return Err(RandomizePairsError::NotAdmin(room_id.as_str().to_string()));
        }

        let participants: Vec<Participant> = room.participants();
        let assignments = {
            let mut rng = rand::thread_rng();
            pair(&participants, &mut rng)?
        };

        let notifications = assignments
            .iter()
            .map(|a| {
                Notification::new(
                    a.giver.clone(),
                    messages::assignment(room_id, &a.receiver.name),
                )
            })
            .collect();
        let report = self.dispatcher.deliver_all(notifications).await;

        tracing::info!(
            "Pairs drawn in room {}: {}/{} givers notified",
            room_id,
            report.delivered_count(),
            report.attempted()
        );

        Ok(PairingOutcome {
            room_id: room_id.clone(),
            assignments,
            report,
        })
    }
}
