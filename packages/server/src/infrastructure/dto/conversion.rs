//! Conversion logic between DTOs and domain entities.

use hohoho_shared::time::timestamp_to_jst_rfc3339;
use uuid::Uuid;

use crate::domain::{
    Button, DisplayName, EventKind, OutboundMessage, Participant, RepositoryError, Room,
    RoomDescription, RoomId, Timestamp, UserId,
};
use crate::infrastructure::dto::{document, http, websocket as ws};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<document::RoomDocument> for Room {
    type Error = RepositoryError;

    fn try_from(doc: document::RoomDocument) -> Result<Self, Self::Error> {
        let corrupted = |reason: String| {
            RepositoryError::Storage(format!("room '{}' is corrupted: {}", doc.room_id, reason))
        };

        let id = RoomId::new(doc.room_id.clone()).map_err(|e| corrupted(e.to_string()))?;
        let description =
            RoomDescription::new(doc.description.clone()).map_err(|e| corrupted(e.to_string()))?;
        let admin = UserId::new(doc.admin.clone()).map_err(|e| corrupted(e.to_string()))?;
        let participants = doc
            .participants
            .iter()
            .map(|(id, name)| {
                Ok(Participant::new(
                    UserId::new(id.clone()).map_err(|e| corrupted(e.to_string()))?,
                    DisplayName::new(name.clone()).map_err(|e| corrupted(e.to_string()))?,
                ))
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Room::restore(
            id,
            description,
            admin,
            participants,
            Timestamp::new(doc.created_at),
        )
        .map_err(|e| corrupted(e.to_string()))
    }
}

impl From<ws::ClientFrame> for EventKind {
    fn from(frame: ws::ClientFrame) -> Self {
        match frame {
            ws::ClientFrame::Text { text } => EventKind::from_text(text),
            ws::ClientFrame::Callback { data } => EventKind::Callback(data),
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&Room> for document::RoomDocument {
    fn from(room: &Room) -> Self {
        Self {
            room_id: room.id.as_str().to_string(),
            description: room.description.as_str().to_string(),
            admin: room.admin.as_str().to_string(),
            participants: room
                .participants()
                .into_iter()
                .map(|p| (p.id.into_string(), p.name.into_string()))
                .collect(),
            created_at: room.created_at.value(),
        }
    }
}

impl From<&Room> for http::RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            description: room.description.as_str().to_string(),
            admin: room.admin.as_str().to_string(),
            participants: room
                .participants()
                .into_iter()
                .map(|p| http::ParticipantDetailDto {
                    user_id: p.id.into_string(),
                    name: p.name.into_string(),
                })
                .collect(),
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
        }
    }
}

impl From<&Button> for ws::ButtonDto {
    fn from(button: &Button) -> Self {
        Self {
            label: button.label.clone(),
            data: button.data.clone(),
        }
    }
}

/// OutboundMessage を通知フレームに変換（message_id は新規に採番）
pub fn to_notification(message: &OutboundMessage) -> ws::NotificationMessage {
    ws::NotificationMessage {
        r#type: ws::MessageType::Notification,
        message_id: Uuid::new_v4().to_string(),
        text: message.text.clone(),
        buttons: message.buttons.iter().map(ws::ButtonDto::from).collect(),
        pinned: message.pin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn document(participants: &[(&str, &str)]) -> document::RoomDocument {
        document::RoomDocument {
            room_id: "4821".to_string(),
            description: "Office party".to_string(),
            admin: "alice".to_string(),
            participants: participants
                .iter()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect::<IndexMap<_, _>>(),
            created_at: 1000,
        }
    }

    #[test]
    fn test_document_to_room() {
        // テスト項目: ドキュメントがドメインの Room に変換される
        // given (前提条件):
        let doc = document(&[("alice", "Alice"), ("bob", "Bo")]);

        // when (操作):
        let room = Room::try_from(doc).unwrap();

        // then (期待する結果):
        assert_eq!(room.id.as_str(), "4821");
        assert_eq!(room.participant_count(), 2);
        assert_eq!(room.participants()[1].name.as_str(), "Bo");
    }

    #[test]
    fn test_document_with_invalid_room_id_is_rejected() {
        // テスト項目: 不正な room_id のドキュメントは Storage エラーになる
        // given (前提条件):
        let mut doc = document(&[("alice", "Alice")]);
        doc.room_id = "48210".to_string();

        // when (操作):
        let result = Room::try_from(doc);

        // then (期待する結果):
        assert!(matches!(result, Err(RepositoryError::Storage(_))));
    }

    #[test]
    fn test_room_to_document_keeps_order() {
        // テスト項目: Room からドキュメントへの変換で参加順が保たれる
        // given (前提条件):
        let room = Room::try_from(document(&[("alice", "Alice"), ("zed", "Zed"), ("bob", "Bo")]))
            .unwrap();

        // when (操作):
        let doc = document::RoomDocument::from(&room);

        // then (期待する結果):
        let keys: Vec<_> = doc.participants.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["alice", "zed", "bob"]);
    }

    #[test]
    fn test_room_to_detail_dto() {
        // テスト項目: Room が HTTP のルーム詳細 DTO に変換される
        // given (前提条件):
        let room = Room::try_from(document(&[("alice", "Alice"), ("bob", "Bo")])).unwrap();

        // when (操作):
        let dto = http::RoomDetailDto::from(&room);

        // then (期待する結果):
        assert_eq!(dto.id, "4821");
        assert_eq!(dto.admin, "alice");
        assert_eq!(dto.participants.len(), 2);
        assert_eq!(dto.participants[1].user_id, "bob");
        assert!(dto.created_at.contains("+09:00"));
    }

    #[test]
    fn test_client_frame_to_event_kind() {
        // テスト項目: クライアントフレームがイベント種別に変換される
        // given (前提条件):
        let command = ws::ClientFrame::Text {
            text: "/create_room".to_string(),
        };
        let callback = ws::ClientFrame::Callback {
            data: "4821".to_string(),
        };

        // when (操作) / then (期待する結果):
        assert_eq!(
            EventKind::from(command),
            EventKind::Command(crate::domain::Command::CreateRoom)
        );
        assert_eq!(
            EventKind::from(callback),
            EventKind::Callback("4821".to_string())
        );
    }

    #[test]
    fn test_outbound_message_to_notification() {
        // テスト項目: 送信メッセージが通知フレームに変換され、message_id が採番される
        // given (前提条件):
        let message = OutboundMessage::text("Pick a room")
            .with_buttons(vec![Button::new("4821", "4821")])
            .pinned();

        // when (操作):
        let first = to_notification(&message);
        let second = to_notification(&message);

        // then (期待する結果):
        assert_eq!(first.text, "Pick a room");
        assert_eq!(first.buttons[0].data, "4821");
        assert!(first.pinned);
        assert_ne!(first.message_id, second.message_id);
    }
}
