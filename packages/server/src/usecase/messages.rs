//! ユーザー向けの文面
//!
//! 文面はすべて英語です。ボタンの data はルーム ID または削除確認の定数です。

use crate::domain::{
    BotEntryPoint, Button, CANCEL_DELETION, CONFIRM_DELETION, DisplayName, OutboundMessage, Room,
    RoomDescription, RoomId, RoomSummary, UserId,
};

pub const BOT_STARTED: &str = "Bot has been started";
pub const BOT_STOPPED: &str = "Bot has been stopped";

pub fn greeting() -> OutboundMessage {
    OutboundMessage::text(
        "🎄 Welcome to Secret Santa! ❄️\n\
         Use /create_room to start your own holiday room, or open a join link \
         you received from a friend. 🎅🌟",
    )
}

pub fn usage_hint() -> OutboundMessage {
    OutboundMessage::text(
        "🎅 Here is what I can do:\n\
         /create_room - create a new room\n\
         /room_info - show the rooms you belong to\n\
         /delete_room - delete a room you administer\n\
         /randomize - draw Secret Santa pairs in one of your rooms\n\
         /cancel - abandon the current step",
    )
}

pub fn ask_name() -> OutboundMessage {
    OutboundMessage::text(
        "🎄 Ho-ho-ho! 🎅\n🌟 Please tell me your first and last name so the other \
         participants know who you are! 🎄",
    )
}

pub fn invalid_name() -> OutboundMessage {
    OutboundMessage::text("✍️ Please send a non-empty name of at most 128 characters.")
}

pub fn room_not_found(raw_room_id: &str) -> OutboundMessage {
    OutboundMessage::text(format!(
        "🔍 Oops! Room {} was not found... 🤔 Check the ID or create a new room with /create_room 🌟",
        raw_room_id
    ))
}

pub fn already_participant() -> OutboundMessage {
    OutboundMessage::text("🌟 You are already a participant of this room! 🎉")
}

pub fn welcome(room: &Room) -> OutboundMessage {
    OutboundMessage::text(format!(
        "🎅 Welcome to Secret Santa room {}.\n🎄 Here is what it is about: {} 🌟",
        room.id,
        room.description.as_str()
    ))
}

pub fn participant_joined(name: &DisplayName, room_id: &RoomId) -> OutboundMessage {
    OutboundMessage::text(format!(
        "🌟 Great news! {} just joined your room {} 🎄. Let's make it festive together! 🎉",
        name, room_id
    ))
}

pub fn ask_description() -> OutboundMessage {
    OutboundMessage::text(
        "🎇 Tell us a little about your room: send a short description to set the holiday mood! 🏠✨",
    )
}

pub fn invalid_description() -> OutboundMessage {
    OutboundMessage::text("✍️ Please send a non-empty description of at most 1024 characters.")
}

pub fn room_created(room_id: &RoomId, description: &RoomDescription) -> OutboundMessage {
    OutboundMessage::text(format!(
        "🎉 Room created! Room ID: {} 🎄\nDescription: {} 📜\n\
         You are the admin and the first participant of this room! 🌟",
        room_id,
        description.as_str()
    ))
}

pub fn join_link(entry_point: &BotEntryPoint, room_id: &RoomId) -> OutboundMessage {
    OutboundMessage::text(format!(
        "🔗 Join link: 🔗\n{}",
        entry_point.join_link(room_id)
    ))
}

pub fn room_info(room: &Room, viewer: &UserId, entry_point: &BotEntryPoint) -> OutboundMessage {
    let role = if room.is_admin(viewer) {
        "Admin"
    } else {
        "Participant"
    };
    let names = room
        .participant_names()
        .map(DisplayName::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    OutboundMessage::text(format!(
        "🌟 Room ID: {} 🎄\n\
         Your role: {}\n\
         Description:\n{} 📝\n\
         Participants: {} 🎉\n\
         Participant list: {} 🎊\n\
         Join link:\n{}",
        room.id,
        role,
        room.description.as_str(),
        room.participant_count(),
        names,
        entry_point.join_link(&room.id)
    ))
}

pub fn no_rooms() -> OutboundMessage {
    OutboundMessage::text(
        "🤷 Looks like you are not in any room yet. No worries! You can always create one with /create_room 🌟",
    )
}

fn room_buttons(rooms: &[RoomSummary]) -> Vec<Button> {
    rooms
        .iter()
        .map(|room| {
            Button::new(
                format!("{} · {}", room.id, room.description.as_str()),
                room.id.as_str(),
            )
        })
        .collect()
}

pub fn no_rooms_to_delete() -> OutboundMessage {
    OutboundMessage::text("You have no rooms to delete.")
}

pub fn choose_room_to_delete(rooms: &[RoomSummary]) -> OutboundMessage {
    OutboundMessage::text("Choose a room to delete:").with_buttons(room_buttons(rooms))
}

pub fn confirm_deletion(room_id: &RoomId) -> OutboundMessage {
    OutboundMessage::text(format!("Are you sure you want to delete room {}?", room_id))
        .with_buttons(vec![
            Button::new("Yes, delete", CONFIRM_DELETION),
            Button::new("Cancel", CANCEL_DELETION),
        ])
}

pub fn room_deleted(room_id: &RoomId) -> OutboundMessage {
    OutboundMessage::text(format!("Room {} has been deleted.", room_id))
}

pub fn deletion_cancelled() -> OutboundMessage {
    OutboundMessage::text("Deletion cancelled.")
}

pub fn not_admin(room_id: &RoomId) -> OutboundMessage {
    OutboundMessage::text(format!("Only the admin of room {} can do that.", room_id))
}

pub fn no_rooms_to_pair() -> OutboundMessage {
    OutboundMessage::text(
        "You have no rooms with at least two participants where you are the admin.",
    )
}

pub fn choose_room_to_pair(rooms: &[RoomSummary]) -> OutboundMessage {
    OutboundMessage::text("Choose a room to draw pairs in:").with_buttons(room_buttons(rooms))
}

/// ペアの通知（受信者のチャットにピン留めする）
pub fn assignment(room_id: &RoomId, receiver: &DisplayName) -> OutboundMessage {
    OutboundMessage::text(format!(
        "Room {}: 🎁 You are giving a present to {} 🎄",
        room_id, receiver
    ))
    .pinned()
}

pub fn pairing_summary(room_id: &RoomId, delivered: usize, total: usize) -> OutboundMessage {
    if delivered == total {
        OutboundMessage::text(format!(
            "Room {}: 🎊 Pairs have been drawn and sent to all {} participants! 🌟",
            room_id, total
        ))
    } else {
        OutboundMessage::text(format!(
            "Room {}: 🎊 Pairs have been drawn, but only {} of {} participants could be reached. \
             The others should start a chat with the bot.",
            room_id, delivered, total
        ))
    }
}

pub fn not_enough_participants() -> OutboundMessage {
    OutboundMessage::text("Not enough participants to draw pairs.")
}

pub fn invalid_selection() -> OutboundMessage {
    OutboundMessage::text("Please choose one of the options offered above, or send /cancel.")
}

pub fn cancelled() -> OutboundMessage {
    OutboundMessage::text("Okay, cancelled. 👌")
}

pub fn nothing_to_cancel() -> OutboundMessage {
    OutboundMessage::text("There is nothing to cancel.")
}

pub fn generic_failure() -> OutboundMessage {
    OutboundMessage::text("😿 Something went wrong on our side. Please try again later.")
}
