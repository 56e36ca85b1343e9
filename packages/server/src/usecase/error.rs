//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{PairingError, RepositoryError, ValueObjectError};

/// ルーム作成のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    /// 規定回数の候補がすべて使用中だった
    #[error("No free room ID found after {0} attempts")]
    CapacityExhausted(usize),

    #[error("Failed to generate room ID: {0}")]
    IdGeneration(#[from] ValueObjectError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// ルーム参加のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("'{0}' is not a valid room ID")]
    InvalidRoomId(String),

    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error("User is already a participant of room '{0}'")]
    AlreadyParticipant(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for JoinRoomError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(id) => JoinRoomError::RoomNotFound(id),
            other => JoinRoomError::Repository(other),
        }
    }
}

/// ルーム削除のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteRoomError {
    #[error("Only the admin can delete room '{0}'")]
    NotAdmin(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// ペア決めのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RandomizePairsError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error("Only the admin can randomize room '{0}'")]
    NotAdmin(String),

    #[error(transparent)]
    Pairing(#[from] PairingError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// ルーム情報取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomInfoError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
