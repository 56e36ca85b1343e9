//! 会話ステートマシン
//!
//! 状態（`SessionState`）とイベント（`EventKind`）から、実行するアクション（`Action`）を
//! 純粋関数 `transition` で決定します。

pub mod action;
pub mod event;
pub mod state;
pub mod transition;

pub use action::Action;
pub use event::{Command, EventKind, InboundEvent};
pub use state::{Session, SessionState};
pub use transition::{CANCEL_DELETION, CONFIRM_DELETION, transition};
