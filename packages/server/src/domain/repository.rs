//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use super::{DisplayName, RepositoryError, Room, RoomId, RoomSummary, Session, UserId};

/// Room Repository trait
///
/// ルームの永続化を担うドキュメントストアへのインターフェース。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// ## 一意性
///
/// RoomId の一意性は `insert_if_absent` の原子性で保証します。
/// 「存在確認してから挿入」を UseCase 側で行わないこと。
///
/// ## 並び順
///
/// 複数のルームを返す操作は、作成日時・ID の昇順で返します。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 同じ ID のルームが存在しない場合のみ挿入
    ///
    /// 既に存在する場合は `RepositoryError::RoomAlreadyExists` を返す
    async fn insert_if_absent(&self, room: Room) -> Result<(), RepositoryError>;

    /// ルームが存在するか
    async fn exists(&self, room_id: &RoomId) -> Result<bool, RepositoryError>;

    /// ルームを取得（存在しない場合は `None`）
    async fn get(&self, room_id: &RoomId) -> Result<Option<Room>, RepositoryError>;

    /// 参加者を追加、または表示名を更新
    ///
    /// ルームが存在しない場合は `RepositoryError::RoomNotFound` を返す
    async fn upsert_participant(
        &self,
        room_id: &RoomId,
        user_id: UserId,
        name: DisplayName,
    ) -> Result<(), RepositoryError>;

    /// ユーザーが管理者または参加者であるルーム一覧
    async fn find_by_member(&self, user_id: &UserId) -> Result<Vec<Room>, RepositoryError>;

    /// ユーザーが管理者であるルーム一覧
    async fn find_by_admin(&self, admin: &UserId) -> Result<Vec<RoomSummary>, RepositoryError>;

    /// ユーザーが管理者で、参加者が 2 人以上いるルーム一覧
    async fn find_pairable_by_admin(
        &self,
        admin: &UserId,
    ) -> Result<Vec<RoomSummary>, RepositoryError>;

    /// ルームを削除（存在しなくてもエラーにしない）
    async fn delete(&self, room_id: &RoomId) -> Result<(), RepositoryError>;
}

/// Session Repository trait
///
/// ユーザーごとの会話セッションを保持します。プロセス再起動で失われる一時データです。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// ユーザーのセッションを排他的に取得（存在しなければ Idle で作成）
    ///
    /// 返されたガードを保持している間、同じユーザーの他のイベントは待たされる。
    /// 一定時間操作がなかったセッションは Idle にリセットされた状態で返る。
    async fn acquire(&self, user_id: &UserId) -> OwnedMutexGuard<Session>;

    /// 使用中でない期限切れセッションを破棄し、破棄した件数を返す
    async fn purge_expired(&self) -> usize;
}
