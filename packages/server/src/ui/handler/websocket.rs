//! WebSocket connection handlers.
//!
//! 1 接続 = 1 ユーザーのチャットです。受信したフレームは接続ごとのタスクで順番に処理し、
//! ユーザーへの送信は `WebSocketMessagePusher` に登録したチャネル経由で行います。

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{Stream, StreamExt},
};
use serde::Deserialize;
use tokio::sync::{Notify, mpsc};

use crate::{
    domain::{DisplayName, EventKind, InboundEvent, UserId},
    infrastructure::{dto::websocket::ClientFrame, message_pusher::WebSocketMessagePusher},
    ui::state::AppState,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub user_id: String,
    pub user_name: String,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> Domain Models
    let user_id = UserId::try_from(query.user_id.clone()).map_err(|e| {
        tracing::warn!("Invalid user_id '{}': {}", query.user_id, e);
        StatusCode::BAD_REQUEST
    })?;
    let user_name = DisplayName::try_from(query.user_name.clone()).map_err(|e| {
        tracing::warn!("Invalid user_name '{}': {}", query.user_name, e);
        StatusCode::BAD_REQUEST
    })?;

    // Create a channel for this user to receive messages
    let (tx, rx) = mpsc::unbounded_channel();
    if !state.message_pusher.register_client(&user_id, tx).await {
        tracing::warn!(
            "User '{}' is already connected. Rejecting connection.",
            user_id
        );
        return Err(StatusCode::CONFLICT);
    }

    tracing::info!("User '{}' ({}) connected", user_id, user_name);
    let release = release_on_failed_upgrade(state.message_pusher.clone(), user_id.clone());
    Ok(ws
        .on_failed_upgrade(release)
        .on_upgrade(move |socket| handle_socket(socket, state, user_id, user_name, rx)))
}

/// アップグレードに失敗した接続の登録を解除する
fn release_on_failed_upgrade(
    message_pusher: Arc<WebSocketMessagePusher>,
    user_id: UserId,
) -> impl FnOnce(axum::Error) + Send + 'static {
    move |e| {
        tracing::warn!("WebSocket upgrade for '{}' failed: {}", user_id, e);
        tokio::spawn(async move {
            message_pusher.unregister_client(&user_id).await;
        });
    }
}

/// Spawns a task that forwards messages from the rx channel to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// 受信フレームを順番に処理する
///
/// `stop` はイベントの合間にだけ確認するので、処理中のイベントは途中で打ち切られない。
async fn receive_loop<S>(
    mut receiver: S,
    state: Arc<AppState>,
    user_id: UserId,
    user_name: DisplayName,
    stop: Arc<Notify>,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin + Send + 'static,
{
    loop {
        let msg = tokio::select! {
            biased;
            _ = stop.notified() => break,
            msg = receiver.next() => msg,
        };
        let msg = match msg {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::warn!("WebSocket error from '{}': {}", user_id, e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => {
                let frame = match serde_json::from_str::<ClientFrame>(&text) {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::warn!("Ignoring malformed frame from '{}': {}", user_id, e);
                        continue;
                    }
                };

                // DTO → Domain Model
                let event =
                    InboundEvent::new(user_id.clone(), user_name.clone(), EventKind::from(frame));
                state.handle_event_usecase.handle(event).await;
            }
            Message::Close(_) => {
                tracing::debug!("User '{}' sent close frame", user_id);
                break;
            }
            _ => {}
        }
    }
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    user_id: UserId,
    user_name: DisplayName,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);

    // 運用者なら保留中の通知を届ける
    state.operator_notice.on_connected(&user_id).await;

    let stop = Arc::new(Notify::new());
    let mut recv_task = tokio::spawn(receive_loop(
        receiver,
        state.clone(),
        user_id.clone(),
        user_name,
        stop.clone(),
    ));

    let send_finished_first = tokio::select! {
        _ = &mut send_task => true,
        _ = &mut recv_task => false,
    };
    if send_finished_first {
        // 処理中のイベント（ペア決めの通知など）は最後まで実行させる
        stop.notify_one();
        if let Err(e) = recv_task.await {
            tracing::warn!("Receive task for '{}' failed: {}", user_id, e);
        }
    } else {
        send_task.abort();
    }

    state.message_pusher.unregister_client(&user_id).await;
    tracing::info!("User '{}' disconnected", user_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Mutex, time::Duration};

    use async_trait::async_trait;
    use hohoho_shared::time::SystemClock;

    use crate::{
        config::BotConfig,
        domain::{BotEntryPoint, MessagePushError, MessagePusher, OutboundMessage},
        infrastructure::repository::{InMemoryRoomRepository, InMemorySessionRepository},
        ui::operator_notice::OperatorNotice,
        usecase::HandleEventUseCase,
    };

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 接続の終了時に、処理中のイベントが最後まで実行されること
    // - アップグレードに失敗した接続の登録が解除されること
    // ========================================

    /// 送信に時間がかかる MessagePusher（送信開始を `started` で知らせる）
    #[derive(Default)]
    struct SlowPusher {
        started: Notify,
        sent: Mutex<Vec<OutboundMessage>>,
    }

    #[async_trait]
    impl MessagePusher for SlowPusher {
        async fn push_to(
            &self,
            _recipient: &UserId,
            message: &OutboundMessage,
        ) -> Result<(), MessagePushError> {
            self.started.notify_one();
            tokio::time::sleep(Duration::from_millis(100)).await;
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn app_state(pusher: Arc<SlowPusher>) -> Arc<AppState> {
        let clock = Arc::new(SystemClock);
        let config = BotConfig::with_entry_point(
            BotEntryPoint::new("https://t.me/hohoho_santa_bot".to_string()).unwrap(),
        );
        let handle_event_usecase = Arc::new(HandleEventUseCase::new(
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(InMemorySessionRepository::new(
                clock.clone(),
                Duration::from_secs(900),
            )),
            pusher,
            clock,
            &config,
        ));
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        Arc::new(AppState {
            room_info_usecase: handle_event_usecase.room_info(),
            handle_event_usecase,
            operator_notice: Arc::new(OperatorNotice::new(None, message_pusher.clone())),
            message_pusher,
        })
    }

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    /// mpsc チャネルを WebSocket の受信ストリームとして使う
    fn frame_stream(
        rx: mpsc::UnboundedReceiver<Result<Message, axum::Error>>,
    ) -> impl Stream<Item = Result<Message, axum::Error>> + Unpin + Send + 'static {
        Box::pin(futures_util::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|item| (item, rx))
        }))
    }

    #[tokio::test]
    async fn test_stop_lets_in_flight_event_finish() {
        // テスト項目: 停止の合図が来ても、処理中のイベントの返信は最後まで送られる
        // given (前提条件):
        let pusher = Arc::new(SlowPusher::default());
        let state = app_state(pusher.clone());
        let (tx, rx) = mpsc::unbounded_channel();
        let stop = Arc::new(Notify::new());
        let task = tokio::spawn(receive_loop(
            frame_stream(rx),
            state,
            user("1001"),
            DisplayName::new("Alice".to_string()).unwrap(),
            stop.clone(),
        ));

        // when (操作): 返信の送信中に停止を合図する
        let frame = r#"{"type":"text","text":"/help"}"#.to_string();
        tx.send(Ok(Message::Text(frame.into()))).unwrap();
        pusher.started.notified().await;
        stop.notify_one();
        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();

        // then (期待する結果):
        let sent = pusher.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].text.contains("/create_room"));
    }

    #[tokio::test]
    async fn test_stop_ends_idle_loop() {
        // テスト項目: 受信待ちの間に停止を合図するとループが終わる
        // given (前提条件):
        let pusher = Arc::new(SlowPusher::default());
        let (_tx, rx) = mpsc::unbounded_channel();
        let stop = Arc::new(Notify::new());
        let task = tokio::spawn(receive_loop(
            frame_stream(rx),
            app_state(pusher.clone()),
            user("1001"),
            DisplayName::new("Alice".to_string()).unwrap(),
            stop.clone(),
        ));

        // when (操作):
        stop.notify_one();

        // then (期待する結果):
        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();
        assert!(pusher.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_upgrade_releases_registration() {
        // テスト項目: アップグレードに失敗した接続は登録が解除され、同じユーザーが再接続できる
        // given (前提条件):
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let (tx, _rx) = mpsc::unbounded_channel();
        assert!(message_pusher.register_client(&user("1001"), tx).await);
        let release = release_on_failed_upgrade(message_pusher.clone(), user("1001"));

        // when (操作):
        release(axum::Error::new("connection reset before upgrade"));
        for _ in 0..50 {
            if !message_pusher.is_registered(&user("1001")).await {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        // then (期待する結果):
        assert!(!message_pusher.is_registered(&user("1001")).await);
        let (tx, _rx) = mpsc::unbounded_channel();
        assert!(message_pusher.register_client(&user("1001"), tx).await);
    }
}
