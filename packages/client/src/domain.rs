//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use hohoho_server::infrastructure::dto::websocket::{ButtonDto, ClientFrame};
use url::Url;

use crate::error::ClientError;

/// 標準入力 1 行の解釈結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// そのまま送るテキスト（`/command` を含む）
    Text(String),
    /// `:N` で押したボタン（0 始まりの位置）
    Button(usize),
}

/// Check if the client should exit immediately based on the error type.
///
/// Duplicate or rejected users and broken URLs never recover by reconnecting.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::DuplicateUserId(_) | ClientError::Rejected(_) | ClientError::InvalidUrl(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}

/// 接続 URL を組み立てる（`?user_id=...&user_name=...`）
pub fn build_connect_url(base: &str, user_id: &str, user_name: &str) -> Result<Url, ClientError> {
    Url::parse_with_params(base, &[("user_id", user_id), ("user_name", user_name)])
        .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base, e)))
}

/// 入力行を解釈する。空行は `None`
pub fn parse_input(line: &str) -> Option<UserInput> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(number) = line.strip_prefix(':')
        && let Ok(number) = number.trim().parse::<usize>()
        && number >= 1
    {
        return Some(UserInput::Button(number - 1));
    }

    Some(UserInput::Text(line.to_string()))
}

/// 入力を送信フレームにする。存在しないボタンなら `None`
pub fn build_frame(input: UserInput, buttons: &[ButtonDto]) -> Option<ClientFrame> {
    match input {
        UserInput::Text(text) => Some(ClientFrame::Text { text }),
        UserInput::Button(index) => buttons.get(index).map(|button| ClientFrame::Callback {
            data: button.data.clone(),
        }),
    }
}
