//! 値オブジェクト定義
//!
//! 生の文字列をそのまま扱わず、生成時に検証済みの型としてドメインに持ち込みます。
//! 生成に成功した値オブジェクトは常に不変条件を満たします。

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ValueObjectError;

/// ルーム ID の桁数
pub const ROOM_ID_LENGTH: usize = 4;

/// ユーザー ID の最大長
pub const MAX_USER_ID_LENGTH: usize = 64;

/// 表示名の最大長（文字数）
pub const MAX_DISPLAY_NAME_LENGTH: usize = 128;

/// ルーム説明の最大長（文字数）
pub const MAX_DESCRIPTION_LENGTH: usize = 1024;

/// ルーム ID
///
/// 常に 4 桁の 10 進数文字列として保持・比較します（数値には変換しない）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomId(String);

impl RoomId {
    /// 文字列から RoomId を作成
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let is_valid =
            value.len() == ROOM_ID_LENGTH && value.chars().all(|c| c.is_ascii_digit());
        if !is_valid {
            return Err(ValueObjectError::InvalidRoomId(value));
        }
        Ok(Self(value))
    }

    /// 数値から RoomId を作成（0..=9999 のみ有効）
    pub fn from_number(value: u16) -> Result<Self, ValueObjectError> {
        Self::new(format!("{:04}", value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoomId> for String {
    fn from(id: RoomId) -> Self {
        id.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ユーザー ID（チャットプラットフォームが付与する識別子）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyUserId);
        }
        if value.len() > MAX_USER_ID_LENGTH {
            return Err(ValueObjectError::UserIdTooLong(value.len()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 参加者の表示名（前後の空白は除去して保持）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyDisplayName);
        }
        let length = trimmed.chars().count();
        if length > MAX_DISPLAY_NAME_LENGTH {
            return Err(ValueObjectError::DisplayNameTooLong(length));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DisplayName> for String {
    fn from(name: DisplayName) -> Self {
        name.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ルームの説明文（作成時に一度だけ設定される）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomDescription(String);

impl RoomDescription {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyDescription);
        }
        let length = trimmed.chars().count();
        if length > MAX_DESCRIPTION_LENGTH {
            return Err(ValueObjectError::DescriptionTooLong(length));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomDescription {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoomDescription> for String {
    fn from(description: RoomDescription) -> Self {
        description.0
    }
}

/// タイムスタンプ（Unix epoch ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// `earlier` からの経過ミリ秒
    pub fn millis_since(&self, earlier: Timestamp) -> i64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// ボットのエントリポイント（例: `https://t.me/hohoho_santa_bot`）
///
/// 参加リンク `<entry_point>?start=<room_id>` の組み立てに使います。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotEntryPoint(String);

impl BotEntryPoint {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.contains('?') || trimmed.contains(char::is_whitespace) {
            return Err(ValueObjectError::InvalidEntryPoint(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 参加リンクを生成
    pub fn join_link(&self, room_id: &RoomId) -> String {
        format!("{}?start={}", self.0, room_id.as_str())
    }
}
