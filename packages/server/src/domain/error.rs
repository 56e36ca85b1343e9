//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクトの生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Room ID must be exactly 4 decimal digits, got '{0}'")]
    InvalidRoomId(String),

    #[error("User ID must not be empty")]
    EmptyUserId,

    #[error("User ID is too long ({0} bytes)")]
    UserIdTooLong(usize),

    #[error("Display name must not be empty")]
    EmptyDisplayName,

    #[error("Display name is too long ({0} characters)")]
    DisplayNameTooLong(usize),

    #[error("Room description must not be empty")]
    EmptyDescription,

    #[error("Room description is too long ({0} characters)")]
    DescriptionTooLong(usize),

    #[error("Invalid bot entry point: '{0}'")]
    InvalidEntryPoint(String),
}

/// Room エンティティの不変条件違反（永続化データの復元時に検出）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomInvariantError {
    #[error("Room has no participants")]
    NoParticipants,

    #[error("Admin '{0}' is not the first participant")]
    AdminNotFirst(String),

    #[error("Participant '{0}' appears more than once")]
    DuplicateParticipant(String),
}

/// Repository のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error("Room '{0}' already exists")]
    RoomAlreadyExists(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// MessagePusher のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Recipient '{0}' is not reachable")]
    RecipientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}

/// ペア決めのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    #[error("At least 2 participants are required, got {0}")]
    InsufficientParticipants(usize),
}
