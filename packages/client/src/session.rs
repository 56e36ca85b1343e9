//! WebSocket client session management.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use hohoho_server::infrastructure::dto::websocket::{ButtonDto, NotificationMessage};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, http::StatusCode, protocol::Message},
};

use crate::{
    domain::{UserInput, build_connect_url, build_frame, parse_input},
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

/// 最後に受け取ったボタン一覧（`:N` の押下先）
type LatestButtons = Arc<Mutex<Vec<ButtonDto>>>;

/// Run the WebSocket client session
pub async fn run_client_session(
    url: &str,
    user_id: &str,
    user_name: &str,
) -> Result<(), ClientError> {
    let url = build_connect_url(url, user_id, user_name)?;

    let (ws_stream, _response) = match connect_async(url.as_str()).await {
        Ok(result) => result,
        Err(tungstenite::Error::Http(response)) if response.status() == StatusCode::CONFLICT => {
            return Err(ClientError::DuplicateUserId(user_id.to_string()));
        }
        Err(tungstenite::Error::Http(response))
            if response.status() == StatusCode::BAD_REQUEST =>
        {
            return Err(ClientError::Rejected(format!(
                "user ID '{}' or name '{}' is not acceptable",
                user_id, user_name
            )));
        }
        Err(e) => return Err(ClientError::ConnectionError(e.to_string())),
    };

    tracing::info!("Connected to the Secret Santa bot!");
    println!(
        "\nYou are '{}' ({}). Type /create_room to start, :N to press a button. Press Ctrl+C to exit.\n",
        user_name, user_id
    );

    let (mut write, mut read) = ws_stream.split();
    let latest_buttons: LatestButtons = Arc::new(Mutex::new(Vec::new()));

    // Spawn a task to handle incoming messages
    let user_name_for_read = user_name.to_string();
    let buttons_for_read = latest_buttons.clone();
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<NotificationMessage>(&text) {
                        Ok(notification) => {
                            if !notification.buttons.is_empty() {
                                *buttons_for_read.lock().await = notification.buttons.clone();
                            }
                            print!("{}", MessageFormatter::format_notification(&notification));
                        }
                        Err(_) => print!("{}", MessageFormatter::format_raw_message(&text)),
                    }
                    redisplay_prompt(&user_name_for_read);
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&user_name_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let prompt = format!("{}> ", user_name);
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to turn input lines into frames and send them
    let user_name_for_write = user_name.to_string();
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let Some(input) = parse_input(&line) else {
                continue;
            };

            let frame = {
                let buttons = latest_buttons.lock().await;
                match build_frame(input.clone(), &buttons) {
                    Some(frame) => frame,
                    None => {
                        if let UserInput::Button(index) = input {
                            print!(
                                "{}",
                                MessageFormatter::format_unknown_button(index + 1, buttons.len())
                            );
                        }
                        redisplay_prompt(&user_name_for_write);
                        continue;
                    }
                }
            };

            let json = match serde_json::to_string(&frame) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize frame: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                write_error = true;
                break;
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            if read_result.unwrap_or(false) {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            if write_result.unwrap_or(false) {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
        }
    }

    Ok(())
}
