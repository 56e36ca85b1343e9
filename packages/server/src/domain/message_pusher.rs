//! メッセージ送信（通知）のインターフェース
//!
//! チャットトランスポートへの出力を抽象化します。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;

use super::{MessagePushError, UserId};

/// インラインボタン（押されると `data` がコールバックとして返ってくる）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// 送信するメッセージ
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutboundMessage {
    pub text: String,
    pub buttons: Vec<Button>,
    /// 受信者のチャットにピン留めするか
    pub pin: bool,
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn pinned(mut self) -> Self {
        self.pin = true;
        self
    }
}

/// MessagePusher trait
///
/// 特定のユーザーへメッセージを届ける。届けられなかった場合はエラーを返すだけで、
/// 再送やロールバックは呼び出し側（NotificationDispatcher）の責務ではない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 特定のユーザーにメッセージを送信
    async fn push_to(
        &self,
        recipient: &UserId,
        message: &OutboundMessage,
    ) -> Result<(), MessagePushError>;
}
