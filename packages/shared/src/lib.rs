//! Hohoho の各パッケージで共有するユーティリティ
//!
//! - `logger`: tracing subscriber の初期化
//! - `time`: 時刻取得と Clock 抽象

pub mod logger;
pub mod time;
