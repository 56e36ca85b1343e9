//! Server state shared by handlers.

use std::sync::Arc;

use crate::{
    infrastructure::message_pusher::WebSocketMessagePusher,
    usecase::{HandleEventUseCase, RoomInfoUseCase},
};

use super::operator_notice::OperatorNotice;

/// Shared application state
pub struct AppState {
    /// HandleEventUseCase（受信イベント処理のユースケース）
    pub handle_event_usecase: Arc<HandleEventUseCase>,
    /// RoomInfoUseCase（ルーム情報取得のユースケース）
    pub room_info_usecase: Arc<RoomInfoUseCase>,
    /// 接続の登録・解除に使う（送信は UseCase が MessagePusher trait 経由で行う）
    pub message_pusher: Arc<WebSocketMessagePusher>,
    /// 運用者への保留中の通知
    pub operator_notice: Arc<OperatorNotice>,
}
