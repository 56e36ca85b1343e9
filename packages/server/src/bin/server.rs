//! Secret Santa bot server.
//!
//! Chat clients connect over WebSocket; rooms live in memory or in a JSON file.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hohoho-server
//! cargo run --bin hohoho-server -- --host 0.0.0.0 --port 3000 --store-path rooms.json
//! ```
//!
//! Every option can also be given as an environment variable (or in a `.env` file).

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use hohoho_server::{
    config::{BotConfig, DEFAULT_ENTRY_POINT, DEFAULT_SESSION_TTL_SECS},
    domain::RoomRepository,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryRoomRepository, InMemorySessionRepository, JsonFileRoomRepository},
    },
    ui::Server,
    usecase::{DEFAULT_MAX_ID_ATTEMPTS, HandleEventUseCase},
};
use hohoho_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "hohoho-server")]
#[command(about = "Secret Santa room coordinator bot", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOHOHO_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "HOHOHO_PORT", default_value = "8080")]
    port: u16,

    /// Bot entry point used to build join links (`<entry point>?start=<room id>`)
    #[arg(long, env = "BOT_ENTRY_POINT", default_value = DEFAULT_ENTRY_POINT)]
    entry_point: String,

    /// User ID that receives "started" / "stopped" notices
    #[arg(long, env = "BOT_OPERATOR_ID")]
    operator_id: Option<String>,

    /// JSON file to persist rooms in (in-memory when omitted)
    #[arg(long, env = "ROOM_STORE_PATH")]
    store_path: Option<PathBuf>,

    /// Seconds of inactivity after which a conversation is reset
    #[arg(long, env = "SESSION_TTL_SECS", default_value_t = DEFAULT_SESSION_TTL_SECS)]
    session_ttl_secs: u64,

    /// Attempts to find a free room ID before giving up
    #[arg(long, env = "ROOM_ID_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ID_ATTEMPTS)]
    max_id_attempts: usize,
}

#[tokio::main]
async fn main() {
    // .env があれば読み込む（なくてもよい）
    dotenvy::dotenv().ok();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let config = match BotConfig::new(
        args.entry_point,
        args.operator_id,
        args.session_ttl_secs,
        args.max_id_attempts,
    ) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repositories
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let rooms: Arc<dyn RoomRepository> = match &args.store_path {
        Some(path) => match JsonFileRoomRepository::open(path).await {
            Ok(repository) => Arc::new(repository),
            Err(e) => {
                tracing::error!("Failed to open room store: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            tracing::info!("No store path configured, rooms are kept in memory");
            Arc::new(InMemoryRoomRepository::new())
        }
    };
    let sessions = Arc::new(InMemorySessionRepository::new(
        clock.clone(),
        config.session_ttl,
    ));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let handle_event_usecase = Arc::new(HandleEventUseCase::new(
        rooms,
        sessions,
        message_pusher.clone(),
        clock,
        &config,
    ));

    // 4. Create and run the server
    let server = Server::new(handle_event_usecase, message_pusher, config.operator_id);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
