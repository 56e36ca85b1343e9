//! 遷移表が返すアクション
//!
//! アクションは「何をするか」だけを表し、I/O は行いません。
//! 実行と最終的な状態の決定は `HandleEventUseCase` が担います。

use crate::domain::RoomId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `/start`（引数なし）: 挨拶を返す
    Greet,
    /// `/start <arg>`: 参加フローを開始する（ルーム ID は未検証）
    BeginJoin { raw_room_id: String },
    /// 表示名を受け取り、参加を確定する
    CompleteJoin { room_id: RoomId, name: String },
    /// `/create_room`: 説明文の入力を促す
    PromptDescription,
    /// 説明文を受け取り、ルームを作成する
    CreateRoom { description: String },
    /// `/room_info`: 所属ルームの一覧を返す
    ShowRooms,
    /// `/delete_room`: 削除候補のルームを提示する
    OfferRoomsForDeletion,
    /// 削除対象が選ばれたので確認を求める
    ConfirmDeletion { room_id: RoomId },
    /// 削除を実行する
    DeleteRoom { room_id: RoomId },
    /// 削除を取りやめる
    AbortDeletion,
    /// `/randomize`: ペア決め候補のルームを提示する
    OfferRoomsForPairing,
    /// ペア決めを実行する
    Randomize { room_id: RoomId },
    /// `/cancel`: 進行中のフローを破棄する
    Cancel,
    /// 提示していない選択肢が送られてきた
    InvalidSelection,
    /// 使い方を返す（状態は変えない）
    UsageHint,
    /// 何もしない
    Ignore,
}
