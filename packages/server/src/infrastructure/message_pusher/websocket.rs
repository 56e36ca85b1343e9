//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続中ユーザーの `UnboundedSender` を管理
//! - `OutboundMessage` を通知フレーム（JSON）に変換して送信
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! - UI 層: WebSocket 接続の受付、sender の生成
//! - Infrastructure 層: sender の管理、メッセージ送信

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{MessagePushError, MessagePusher, OutboundMessage, UserId},
    infrastructure::dto::conversion::to_notification,
};

/// 接続ごとの送信チャネル（シリアライズ済みの JSON を流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のユーザーの WebSocket sender
    ///
    /// Key: user_id (String)
    /// Value: PusherChannel
    clients: Arc<Mutex<HashMap<String, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 接続を登録
    ///
    /// 同じユーザーが既に接続している場合は登録せず `false` を返す
    pub async fn register_client(&self, user_id: &UserId, sender: PusherChannel) -> bool {
        let mut clients = self.clients.lock().await;
        if clients.contains_key(user_id.as_str()) {
            return false;
        }
        clients.insert(user_id.as_str().to_string(), sender);
        tracing::debug!("Client '{}' registered to MessagePusher", user_id);
        true
    }

    pub async fn unregister_client(&self, user_id: &UserId) {
        let mut clients = self.clients.lock().await;
        clients.remove(user_id.as_str());
        tracing::debug!("Client '{}' unregistered from MessagePusher", user_id);
    }

    pub async fn is_registered(&self, user_id: &UserId) -> bool {
        self.clients.lock().await.contains_key(user_id.as_str())
    }

    pub async fn connected_count(&self) -> usize {
        self.clients.lock().await.len()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn push_to(
        &self,
        recipient: &UserId,
        message: &OutboundMessage,
    ) -> Result<(), MessagePushError> {
        let payload = serde_json::to_string(&to_notification(message))
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;

        let clients = self.clients.lock().await;
        let Some(sender) = clients.get(recipient.as_str()) else {
            return Err(MessagePushError::RecipientNotFound(
                recipient.as_str().to_string(),
            ));
        };

        sender
            .send(payload)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to '{}'", recipient);
        Ok(())
    }
}
