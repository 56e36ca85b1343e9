//! 受信イベント

use crate::domain::{DisplayName, UserId};

/// ボットコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start [arg]`（参加リンクから開かれた場合は arg にルーム ID が入る）
    Start(Option<String>),
    /// `/create_room`
    CreateRoom,
    /// `/room_info`
    RoomInfo,
    /// `/delete_room`
    DeleteRoom,
    /// `/randomize`
    Randomize,
    /// `/cancel`
    Cancel,
    /// `/help`
    Help,
    /// 未知のコマンド（コマンド名を保持）
    Unknown(String),
}

impl Command {
    /// `/` で始まるテキストをコマンドとして解釈する
    ///
    /// `/start@hohoho_santa_bot 4821` のようなボット名付きの形式にも対応します。
    /// `/` で始まらない場合は `None`。
    pub fn parse(text: &str) -> Option<Self> {
        let body = text.trim().strip_prefix('/')?;
        let (head, args) = match body.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (body, ""),
        };
        let name = head.split('@').next().unwrap_or_default();

        let command = match name {
            "start" if args.is_empty() => Command::Start(None),
            "start" => Command::Start(Some(args.to_string())),
            "create_room" => Command::CreateRoom,
            "room_info" => Command::RoomInfo,
            "delete_room" => Command::DeleteRoom,
            "randomize" => Command::Randomize,
            "cancel" => Command::Cancel,
            "help" => Command::Help,
            other => Command::Unknown(other.to_string()),
        };
        Some(command)
    }
}

/// 受信イベントの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Command(Command),
    /// コマンド以外のテキスト入力
    Text(String),
    /// ボタン押下（ボタンの data）
    Callback(String),
}

impl EventKind {
    /// テキストメッセージを Command または Text に振り分ける
    pub fn from_text(text: String) -> Self {
        match Command::parse(&text) {
            Some(command) => EventKind::Command(command),
            None => EventKind::Text(text),
        }
    }
}

/// チャットトランスポートから届くイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub user_id: UserId,
    pub user_name: DisplayName,
    pub kind: EventKind,
}

impl InboundEvent {
    pub fn new(user_id: UserId, user_name: DisplayName, kind: EventKind) -> Self {
        Self {
            user_id,
            user_name,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start_with_and_without_argument() {
        // テスト項目: /start は引数の有無で区別される
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(Command::parse("/start"), Some(Command::Start(None)));
        assert_eq!(
            Command::parse("/start 4821"),
            Some(Command::Start(Some("4821".to_string())))
        );
        assert_eq!(
            Command::parse("  /start   4821  "),
            Some(Command::Start(Some("4821".to_string())))
        );
    }

    #[test]
    fn test_parse_strips_bot_mention() {
        // テスト項目: `@ボット名` 付きのコマンドも認識される
        // given (前提条件):
        let text = "/randomize@hohoho_santa_bot";

        // when (操作):
        let command = Command::parse(text);

        // then (期待する結果):
        assert_eq!(command, Some(Command::Randomize));
    }

    #[test]
    fn test_parse_known_and_unknown_commands() {
        // テスト項目: 既知のコマンドと未知のコマンドが区別される
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(Command::parse("/create_room"), Some(Command::CreateRoom));
        assert_eq!(Command::parse("/room_info"), Some(Command::RoomInfo));
        assert_eq!(Command::parse("/delete_room"), Some(Command::DeleteRoom));
        assert_eq!(Command::parse("/cancel"), Some(Command::Cancel));
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(
            Command::parse("/dance"),
            Some(Command::Unknown("dance".to_string()))
        );
        assert_eq!(Command::parse("hello"), None);
    }

    #[test]
    fn test_event_kind_from_text() {
        // テスト項目: `/` で始まるテキストはコマンド、それ以外はテキストになる
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(
            EventKind::from_text("/create_room".to_string()),
            EventKind::Command(Command::CreateRoom)
        );
        assert_eq!(
            EventKind::from_text("Bo".to_string()),
            EventKind::Text("Bo".to_string())
        );
    }
}
