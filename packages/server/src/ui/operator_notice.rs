//! 運用者への起動・停止通知
//!
//! 起動直後は誰も接続していないので、運用者が未接続のときは通知を保留し、
//! 運用者が接続した時点で届けます。保留できる通知は最新の 1 件だけです。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{OutboundMessage, UserId},
    infrastructure::message_pusher::WebSocketMessagePusher,
    usecase::NotificationDispatcher,
};

pub struct OperatorNotice {
    operator_id: Option<UserId>,
    message_pusher: Arc<WebSocketMessagePusher>,
    dispatcher: NotificationDispatcher,
    /// 運用者の接続待ちの通知
    pending: Mutex<Option<OutboundMessage>>,
}

impl OperatorNotice {
    pub fn new(operator_id: Option<UserId>, message_pusher: Arc<WebSocketMessagePusher>) -> Self {
        Self {
            operator_id,
            dispatcher: NotificationDispatcher::new(message_pusher.clone()),
            message_pusher,
            pending: Mutex::new(None),
        }
    }

    /// 運用者へ通知する。未接続なら次の接続まで保留
    pub async fn announce(&self, text: &str) {
        let Some(operator_id) = &self.operator_id else {
            return;
        };
        let message = OutboundMessage::text(text);

        // 接続確認と保留を同じロックの中で行い、on_connected との取りこぼしを防ぐ
        let mut pending = self.pending.lock().await;
        if self.message_pusher.is_registered(operator_id).await
            && self.dispatcher.deliver(operator_id, &message).await.is_ok()
        {
            *pending = None;
            tracing::info!("Notified operator '{}': {}", operator_id, text);
        } else {
            *pending = Some(message);
            tracing::info!(
                "Operator '{}' is not connected; notice kept until they connect: {}",
                operator_id,
                text
            );
        }
    }

    /// 接続したユーザーが運用者なら保留中の通知を届ける
    ///
    /// 接続が MessagePusher に登録された後に呼ぶこと。
    pub async fn on_connected(&self, user_id: &UserId) {
        if self.operator_id.as_ref() != Some(user_id) {
            return;
        }

        let mut pending = self.pending.lock().await;
        let Some(message) = pending.take() else {
            return;
        };
        match self.dispatcher.deliver(user_id, &message).await {
            Ok(()) => tracing::info!("Delivered pending notice to operator '{}'", user_id),
            Err(_) => *pending = Some(message),
        }
    }
}
