//! ボットの設定
//!
//! コマンドライン引数・環境変数の値（`bin/server.rs` の `Args`）を検証して `BotConfig` にします。

use std::time::Duration;

use thiserror::Error;

use crate::{
    domain::{BotEntryPoint, UserId, ValueObjectError},
    usecase::DEFAULT_MAX_ID_ATTEMPTS,
};

/// 参加リンクの既定のエントリポイント
pub const DEFAULT_ENTRY_POINT: &str = "https://t.me/hohoho_santa_bot";

/// 会話セッションの既定の有効期間（秒）
pub const DEFAULT_SESSION_TTL_SECS: u64 = 15 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid entry point: {0}")]
    InvalidEntryPoint(ValueObjectError),

    #[error("Invalid operator ID: {0}")]
    InvalidOperatorId(ValueObjectError),

    #[error("Session TTL must be at least 1 second")]
    ZeroSessionTtl,

    #[error("Room ID allocation needs at least 1 attempt")]
    ZeroIdAttempts,
}

/// 検証済みの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub entry_point: BotEntryPoint,
    pub operator_id: Option<UserId>,
    pub session_ttl: Duration,
    pub max_id_attempts: usize,
}

impl BotConfig {
    pub fn new(
        entry_point: String,
        operator_id: Option<String>,
        session_ttl_secs: u64,
        max_id_attempts: usize,
    ) -> Result<Self, ConfigError> {
        let entry_point = BotEntryPoint::new(entry_point).map_err(ConfigError::InvalidEntryPoint)?;
        // 空文字の環境変数は未設定として扱う
        let operator_id = operator_id
            .filter(|id| !id.trim().is_empty())
            .map(UserId::new)
            .transpose()
            .map_err(ConfigError::InvalidOperatorId)?;

        if session_ttl_secs == 0 {
            return Err(ConfigError::ZeroSessionTtl);
        }
        if max_id_attempts == 0 {
            return Err(ConfigError::ZeroIdAttempts);
        }

        Ok(Self {
            entry_point,
            operator_id,
            session_ttl: Duration::from_secs(session_ttl_secs),
            max_id_attempts,
        })
    }

    /// エントリポイント以外は既定値
    pub fn with_entry_point(entry_point: BotEntryPoint) -> Self {
        Self {
            entry_point,
            operator_id: None,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            max_id_attempts: DEFAULT_MAX_ID_ATTEMPTS,
        }
    }
}
