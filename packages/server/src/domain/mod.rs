//! ドメイン層
//!
//! - 値オブジェクト・エンティティ（Room, Participant）
//! - ペア決めアルゴリズム
//! - 会話ステートマシン（純粋な遷移表）
//! - Repository / MessagePusher の trait（実装は Infrastructure 層）

pub mod conversation;
pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod pairing;
pub mod repository;
pub mod value_object;

pub use conversation::{
    Action, CANCEL_DELETION, CONFIRM_DELETION, Command, EventKind, InboundEvent, Session,
    SessionState, transition,
};
pub use entity::{Participant, Room, RoomSummary};
pub use error::{
    MessagePushError, PairingError, RepositoryError, RoomInvariantError, ValueObjectError,
};
pub use factory::RoomIdFactory;
pub use message_pusher::{Button, MessagePusher, OutboundMessage};
pub use pairing::{Assignment, pair};
pub use repository::{RoomRepository, SessionRepository};
pub use value_object::{
    BotEntryPoint, DisplayName, RoomDescription, RoomId, Timestamp, UserId,
};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
