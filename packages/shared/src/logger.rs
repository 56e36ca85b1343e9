//! Logging setup utilities for the Hohoho binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the Hohoho library crates and the calling binary.
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "hohoho-server", "hohoho-client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use hohoho_shared::logger::setup_logger;
///
/// setup_logger("hohoho-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// `RUST_LOG` が未設定の場合に使うフィルタ文字列を組み立てる
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    [
        "hohoho_shared",
        "hohoho_server",
        "hohoho_client",
        "tower_http",
        binary_name,
    ]
    .iter()
    .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
    .collect::<Vec<_>>()
    .join(",")
}
