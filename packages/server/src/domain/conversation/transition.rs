//! 純粋な遷移表
//!
//! `(状態, イベント) → アクション` の対応をここに集約します。
//! I/O を持たないので、チャット接続なしでテストできます。
//!
//! コマンドはどの状態でも受け付けます。フローに入るコマンドは現在の状態を置き換え、
//! フローに入らないコマンド（挨拶・一覧表示・ヘルプ）は状態を変えません。

use super::{
    action::Action,
    event::{Command, EventKind},
    state::SessionState,
};
use crate::domain::RoomId;

/// 削除確認ボタンの data
pub const CONFIRM_DELETION: &str = "confirm";

/// 削除取消ボタンの data
pub const CANCEL_DELETION: &str = "cancel";

/// 現在の状態とイベントから実行するアクションを決める
pub fn transition(state: &SessionState, event: &EventKind) -> Action {
    match (state, event) {
        (_, EventKind::Command(command)) => command_action(command),

        // 入力待ち
        (SessionState::AwaitingName { room_id }, EventKind::Text(text)) => Action::CompleteJoin {
            room_id: room_id.clone(),
            name: text.clone(),
        },
        (SessionState::AwaitingDescription, EventKind::Text(text)) => Action::CreateRoom {
            description: text.clone(),
        },

        // 選択待ち（提示した ID 以外は受け付けない）
        (SessionState::ChoosingRoomToDelete { offered }, EventKind::Callback(data)) => {
            match select_offered(offered, data) {
                Some(room_id) => Action::ConfirmDeletion { room_id },
                None => Action::InvalidSelection,
            }
        }
        (SessionState::ConfirmingDeletion { room_id }, EventKind::Callback(data)) => {
            match data.as_str() {
                CONFIRM_DELETION => Action::DeleteRoom {
                    room_id: room_id.clone(),
                },
                CANCEL_DELETION => Action::AbortDeletion,
                _ => Action::InvalidSelection,
            }
        }
        (SessionState::ChoosingRoomToPair { offered }, EventKind::Callback(data)) => {
            match select_offered(offered, data) {
                Some(room_id) => Action::Randomize { room_id },
                None => Action::InvalidSelection,
            }
        }

        // ボタン待ちの状態でテキストが来た
        (
            SessionState::ChoosingRoomToDelete { .. }
            | SessionState::ConfirmingDeletion { .. }
            | SessionState::ChoosingRoomToPair { .. },
            EventKind::Text(_),
        ) => Action::InvalidSelection,

        (SessionState::Idle, EventKind::Text(_)) => Action::UsageHint,

        // 古いボタン・テキスト入力中のボタン押下は無視
        (
            SessionState::Idle
            | SessionState::AwaitingName { .. }
            | SessionState::AwaitingDescription,
            EventKind::Callback(_),
        ) => Action::Ignore,
    }
}

fn command_action(command: &Command) -> Action {
    match command {
        Command::Start(None) => Action::Greet,
        Command::Start(Some(arg)) => Action::BeginJoin {
            raw_room_id: arg.clone(),
        },
        Command::CreateRoom => Action::PromptDescription,
        Command::RoomInfo => Action::ShowRooms,
        Command::DeleteRoom => Action::OfferRoomsForDeletion,
        Command::Randomize => Action::OfferRoomsForPairing,
        Command::Cancel => Action::Cancel,
        Command::Help | Command::Unknown(_) => Action::UsageHint,
    }
}

fn select_offered(offered: &[RoomId], data: &str) -> Option<RoomId> {
    offered.iter().find(|id| id.as_str() == data).cloned()
}
