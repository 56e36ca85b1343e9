//! Chat client for the Secret Santa bot.
//!
//! Type `/create_room`, `/start <room id>`, `/room_info`, `/delete_room`,
//! `/randomize_pairs` or `/cancel`. Buttons attached to a message are pressed
//! with `:N` (e.g. `:1`).
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hohoho-client -- --user-id 1001 --user-name Alice
//! cargo run --bin hohoho-client -- -i 1002 -n Bo
//! ```

use clap::Parser;

use hohoho_client::run_client;
use hohoho_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hohoho-client")]
#[command(about = "Chat client for the Secret Santa bot", long_about = None)]
struct Args {
    /// User ID (must be unique among connected clients)
    #[arg(short = 'i', long, env = "HOHOHO_USER_ID")]
    user_id: String,

    /// Display name shown to other participants
    #[arg(short = 'n', long, env = "HOHOHO_USER_NAME")]
    user_name: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, env = "HOHOHO_URL", default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = run_client(args.url, args.user_id, args.user_name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
