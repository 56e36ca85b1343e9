//! Hohoho のチャットクライアント
//!
//! サーバーの `/ws` に 1 ユーザーとして接続し、標準入力のテキストやボタン操作を送ります。

pub mod domain;
pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;
pub mod ui;

pub use runner::run_client;
