//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    domain::UserId,
    infrastructure::message_pusher::WebSocketMessagePusher,
    usecase::{HandleEventUseCase, messages},
};

use super::{
    handler::{get_room_detail, health_check, websocket_handler},
    operator_notice::OperatorNotice,
    signal::shutdown_signal,
    state::AppState,
};

/// Secret Santa bot server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(handle_event_usecase, message_pusher, config.operator_id);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// HandleEventUseCase（受信イベント処理のユースケース）
    handle_event_usecase: Arc<HandleEventUseCase>,
    /// WebSocket 接続の登録先
    message_pusher: Arc<WebSocketMessagePusher>,
    /// 起動・停止の運用者への通知
    operator_notice: Arc<OperatorNotice>,
}

impl Server {
    pub fn new(
        handle_event_usecase: Arc<HandleEventUseCase>,
        message_pusher: Arc<WebSocketMessagePusher>,
        operator_id: Option<UserId>,
    ) -> Self {
        let operator_notice = Arc::new(OperatorNotice::new(operator_id, message_pusher.clone()));
        Self {
            handle_event_usecase,
            message_pusher,
            operator_notice,
        }
    }

    /// ルーターを構築
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            room_info_usecase: self.handle_event_usecase.room_info(),
            handle_event_usecase: self.handle_event_usecase.clone(),
            message_pusher: self.message_pusher.clone(),
            operator_notice: self.operator_notice.clone(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the bot server
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Secret Santa bot listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws?user_id=<id>&user_name=<name>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.announce_started().await;

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        self.operator_notice.announce(messages::BOT_STOPPED).await;
        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// 起動を運用者へ通知する（未接続なら接続時に届く）
    pub async fn announce_started(&self) {
        self.operator_notice.announce(messages::BOT_STARTED).await;
    }
}
