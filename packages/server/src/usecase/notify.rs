//! 通知の配信
//!
//! `MessagePusher` への送信をまとめて行い、受信者ごとの成否を `DeliveryReport` に集約します。
//! 一部の受信者に届かなくても残りの配信は続け、失敗は `warn` で記録するだけです。

use std::sync::Arc;

use thiserror::Error;

use crate::domain::{MessagePushError, MessagePusher, OutboundMessage, UserId};

/// 送信予定の通知（受信者とメッセージの組）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub recipient: UserId,
    pub message: OutboundMessage,
}

impl Notification {
    pub fn new(recipient: UserId, message: OutboundMessage) -> Self {
        Self { recipient, message }
    }
}

/// 1 受信者分の配信失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to deliver to '{recipient}': {reason}")]
pub struct DeliveryFailure {
    pub recipient: UserId,
    pub reason: MessagePushError,
}

/// まとめて配信した結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: Vec<UserId>,
    pub failures: Vec<DeliveryFailure>,
}

impl DeliveryReport {
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failures.len()
    }

    pub fn delivered_count(&self) -> usize {
        self.delivered.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// 通知の配信を担う
pub struct NotificationDispatcher {
    message_pusher: Arc<dyn MessagePusher>,
}

impl NotificationDispatcher {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 1 通だけ送信（失敗は warn で記録して返す）
    pub async fn deliver(
        &self,
        recipient: &UserId,
        message: &OutboundMessage,
    ) -> Result<(), DeliveryFailure> {
        match self.message_pusher.push_to(recipient, message).await {
            Ok(()) => Ok(()),
            Err(reason) => {
                let failure = DeliveryFailure {
                    recipient: recipient.clone(),
                    reason,
                };
                tracing::warn!("{}", failure);
                Err(failure)
            }
        }
    }

    /// 順番にすべて送信し、結果を集約する
    pub async fn deliver_all(&self, notifications: Vec<Notification>) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        for notification in notifications {
            match self
                .deliver(&notification.recipient, &notification.message)
                .await
            {
                Ok(()) => report.delivered.push(notification.recipient),
                Err(failure) => report.failures.push(failure),
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockMessagePusher;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - deliver_all が受信者ごとの成否を集約すること
    // - 途中の失敗で残りの配信が止まらないこと
    //
    // 【なぜこのテストが必要か】
    // - ペア通知の一部が届かなくても、他の参加者には届ける必要がある
    // ========================================

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_deliver_all_success() {
        // テスト項目: すべての受信者に届いた場合は失敗なしのレポートになる
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_push_to().times(2).returning(|_, _| Ok(()));
        let dispatcher = NotificationDispatcher::new(Arc::new(pusher));

        // when (操作):
        let report = dispatcher
            .deliver_all(vec![
                Notification::new(user("alice"), OutboundMessage::text("a")),
                Notification::new(user("bob"), OutboundMessage::text("b")),
            ])
            .await;

        // then (期待する結果):
        assert!(report.is_complete());
        assert_eq!(report.delivered, vec![user("alice"), user("bob")]);
        assert_eq!(report.attempted(), 2);
    }

    #[tokio::test]
    async fn test_deliver_all_continues_after_failure() {
        // テスト項目: 1 人に届かなくても残りの受信者への配信は続く
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .withf(|recipient, _| recipient.as_str() == "bob")
            .times(1)
            .returning(|recipient, _| {
                Err(MessagePushError::RecipientNotFound(
                    recipient.as_str().to_string(),
                ))
            });
        pusher
            .expect_push_to()
            .withf(|recipient, _| recipient.as_str() != "bob")
            .times(2)
            .returning(|_, _| Ok(()));
        let dispatcher = NotificationDispatcher::new(Arc::new(pusher));

        // when (操作):
        let report = dispatcher
            .deliver_all(vec![
                Notification::new(user("alice"), OutboundMessage::text("a")),
                Notification::new(user("bob"), OutboundMessage::text("b")),
                Notification::new(user("carol"), OutboundMessage::text("c")),
            ])
            .await;

        // then (期待する結果):
        assert!(!report.is_complete());
        assert_eq!(report.delivered, vec![user("alice"), user("carol")]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].recipient, user("bob"));
        assert_eq!(report.attempted(), 3);
    }

    #[tokio::test]
    async fn test_deliver_returns_failure() {
        // テスト項目: 単発の送信失敗は DeliveryFailure として返る
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .returning(|_, _| Err(MessagePushError::PushFailed("closed".to_string())));
        let dispatcher = NotificationDispatcher::new(Arc::new(pusher));

        // when (操作):
        let result = dispatcher
            .deliver(&user("alice"), &OutboundMessage::text("hi"))
            .await;

        // then (期待する結果):
        let failure = result.unwrap_err();
        assert_eq!(failure.recipient, user("alice"));
        assert_eq!(
            failure.reason,
            MessagePushError::PushFailed("closed".to_string())
        );
    }
}
