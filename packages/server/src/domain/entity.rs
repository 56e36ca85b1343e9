//! エンティティ定義
//!
//! ## Room の不変条件
//!
//! - 参加者は常に 1 人以上
//! - 管理者（admin）は必ず参加者であり、参加順の先頭
//! - 参加者のキー（UserId）は一意で、挿入順を保持する（ペア決めの初期順序になる）
//!
//! 参加者の変更は `upsert_participant` のみ（追加または表示名の更新）。削除はありません。

use indexmap::IndexMap;

use super::{
    error::RoomInvariantError,
    value_object::{DisplayName, RoomDescription, RoomId, Timestamp, UserId},
};

/// ルームの参加者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: UserId,
    pub name: DisplayName,
}

impl Participant {
    pub fn new(id: UserId, name: DisplayName) -> Self {
        Self { id, name }
    }
}

/// ルーム（プレゼント交換のグループ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub description: RoomDescription,
    pub admin: UserId,
    pub created_at: Timestamp,
    participants: IndexMap<UserId, DisplayName>,
}

impl Room {
    /// 新しいルームを作成（管理者が最初の参加者になる）
    pub fn new(
        id: RoomId,
        description: RoomDescription,
        admin: UserId,
        admin_name: DisplayName,
        created_at: Timestamp,
    ) -> Self {
        let mut participants = IndexMap::new();
        participants.insert(admin.clone(), admin_name);
        Self {
            id,
            description,
            admin,
            created_at,
            participants,
        }
    }

    /// 永続化データから Room を復元
    ///
    /// 復元時に不変条件をすべて検証します。
    pub fn restore(
        id: RoomId,
        description: RoomDescription,
        admin: UserId,
        participants: Vec<Participant>,
        created_at: Timestamp,
    ) -> Result<Self, RoomInvariantError> {
        let first = participants.first().ok_or(RoomInvariantError::NoParticipants)?;
        if first.id != admin {
            return Err(RoomInvariantError::AdminNotFirst(admin.into_string()));
        }

        let mut map = IndexMap::with_capacity(participants.len());
        for participant in participants {
            if map.contains_key(&participant.id) {
                return Err(RoomInvariantError::DuplicateParticipant(
                    participant.id.into_string(),
                ));
            }
            map.insert(participant.id, participant.name);
        }

        Ok(Self {
            id,
            description,
            admin,
            created_at,
            participants: map,
        })
    }

    /// 参加者を追加、または既存参加者の表示名を更新
    ///
    /// # Returns
    ///
    /// 新規参加なら `true`、表示名の更新なら `false`
    pub fn upsert_participant(&mut self, user_id: UserId, name: DisplayName) -> bool {
        // IndexMap::insert は既存キーの位置を保持する
        self.participants.insert(user_id, name).is_none()
    }

    pub fn is_participant(&self, user_id: &UserId) -> bool {
        self.participants.contains_key(user_id)
    }

    pub fn is_admin(&self, user_id: &UserId) -> bool {
        &self.admin == user_id
    }

    pub fn participant_name(&self, user_id: &UserId) -> Option<&DisplayName> {
        self.participants.get(user_id)
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// ペア決めが可能か（参加者 2 人以上）
    pub fn is_pairable(&self) -> bool {
        self.participants.len() >= 2
    }

    /// 参加順の参加者リスト
    pub fn participants(&self) -> Vec<Participant> {
        self.participants
            .iter()
            .map(|(id, name)| Participant::new(id.clone(), name.clone()))
            .collect()
    }

    pub fn participant_names(&self) -> impl Iterator<Item = &DisplayName> {
        self.participants.values()
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id.clone(),
            description: self.description.clone(),
            participant_count: self.participants.len(),
        }
    }
}

/// 選択メニュー用のルーム概要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub id: RoomId,
    pub description: RoomDescription,
    pub participant_count: usize,
}
