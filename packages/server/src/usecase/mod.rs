//! UseCase 層
//!
//! - ルームの作成・参加・削除・ペア決め・情報取得
//! - 通知の配信（NotificationDispatcher）
//! - 受信イベントの処理（会話ステートマシンの実行部）

pub mod create_room;
pub mod delete_room;
pub mod error;
pub mod handle_event;
pub mod join_room;
pub mod messages;
pub mod notify;
pub mod randomize_pairs;
pub mod room_info;

pub use create_room::{CreateRoomUseCase, DEFAULT_MAX_ID_ATTEMPTS};
pub use delete_room::DeleteRoomUseCase;
pub use error::{
    CreateRoomError, DeleteRoomError, JoinRoomError, RandomizePairsError, RoomInfoError,
};
pub use handle_event::HandleEventUseCase;
pub use join_room::JoinRoomUseCase;
pub use notify::{DeliveryFailure, DeliveryReport, Notification, NotificationDispatcher};
pub use randomize_pairs::{PairingOutcome, RandomizePairsUseCase};
pub use room_info::RoomInfoUseCase;
