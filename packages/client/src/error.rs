//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// User ID is already connected from another client
    #[error("User ID '{0}' is already connected")]
    DuplicateUserId(String),

    /// Server refused the user ID or display name
    #[error("Server rejected the connection: {0}")]
    Rejected(String),

    /// Server URL could not be built
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
