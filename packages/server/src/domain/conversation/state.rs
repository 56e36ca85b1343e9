//! 会話セッションの状態

use crate::domain::{RoomId, Timestamp, UserId};

/// セッションの状態
///
/// 各状態に必要なコンテキストだけをバリアントに持たせています。
/// 例えば `AwaitingName` 以外の状態が参加先の `room_id` を持つことはありません。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// 待機中（初期状態・フロー完了後の状態）
    #[default]
    Idle,
    /// 参加フロー: 表示名の入力待ち
    AwaitingName { room_id: RoomId },
    /// 作成フロー: ルーム説明の入力待ち
    AwaitingDescription,
    /// 削除フロー: 削除するルームの選択待ち（提示した ID のみ受け付ける）
    ChoosingRoomToDelete { offered: Vec<RoomId> },
    /// 削除フロー: 削除の確認待ち
    ConfirmingDeletion { room_id: RoomId },
    /// ペア決めフロー: 対象ルームの選択待ち（提示した ID のみ受け付ける）
    ChoosingRoomToPair { offered: Vec<RoomId> },
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    /// ログ出力用の状態名
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::AwaitingName { .. } => "awaiting_name",
            SessionState::AwaitingDescription => "awaiting_description",
            SessionState::ChoosingRoomToDelete { .. } => "choosing_room_to_delete",
            SessionState::ConfirmingDeletion { .. } => "confirming_deletion",
            SessionState::ChoosingRoomToPair { .. } => "choosing_room_to_pair",
        }
    }
}

/// ユーザーごとの会話セッション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub state: SessionState,
    pub last_activity: Timestamp,
}

impl Session {
    pub fn new(user_id: UserId, now: Timestamp) -> Self {
        Self {
            user_id,
            state: SessionState::Idle,
            last_activity: now,
        }
    }

    /// 最終操作から `ttl_millis` 以上経過しているか
    pub fn is_expired(&self, now: Timestamp, ttl_millis: i64) -> bool {
        now.millis_since(self.last_activity) >= ttl_millis
    }

    /// 状態を Idle に戻す
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }

    pub fn touch(&mut self, now: Timestamp) {
        self.last_activity = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_idle() {
        // テスト項目: 新しいセッションは Idle で始まる
        // given (前提条件):
        let user_id = UserId::new("alice".to_string()).unwrap();

        // when (操作):
        let session = Session::new(user_id, Timestamp::new(0));

        // then (期待する結果):
        assert!(session.state.is_idle());
    }

    #[test]
    fn test_session_expiry() {
        // テスト項目: 最終操作から TTL 以上経過すると期限切れになる
        // given (前提条件):
        let mut session = Session::new(UserId::new("alice".to_string()).unwrap(), Timestamp::new(0));
        session.touch(Timestamp::new(1_000));

        // when (操作) / then (期待する結果):
        assert!(!session.is_expired(Timestamp::new(1_999), 1_000));
        assert!(session.is_expired(Timestamp::new(2_000), 1_000));
    }
}
