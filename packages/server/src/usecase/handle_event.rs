//! UseCase: 受信イベントの処理（会話ステートマシンの実行部）
//!
//! ## 処理の流れ
//!
//! ```text
//! acquire(session) → transition(state, event) → Action を実行 → 状態を書き戻す → 返信を配信
//! ```
//!
//! セッションのガードはイベントの処理が終わるまで保持するので、同じユーザーのイベントは
//! 1 つずつ処理されます。どのような入力でもパニックせず、失敗は返信とログで伝えます。

use std::{fmt::Display, sync::Arc};

use hohoho_shared::time::Clock;

use crate::{
    config::BotConfig,
    domain::{
        Action, BotEntryPoint, DisplayName, InboundEvent, MessagePusher, OutboundMessage,
        RoomDescription, RoomId, RoomRepository, SessionRepository, SessionState, Timestamp,
        UserId, transition,
    },
};

use super::{
    create_room::CreateRoomUseCase,
    delete_room::DeleteRoomUseCase,
    error::{CreateRoomError, DeleteRoomError, JoinRoomError, RandomizePairsError},
    join_room::JoinRoomUseCase,
    messages,
    notify::{Notification, NotificationDispatcher},
    randomize_pairs::RandomizePairsUseCase,
    room_info::RoomInfoUseCase,
};

/// アクションを実行した結果
struct Outcome {
    /// 次の状態（`None` なら現在の状態を維持）
    next_state: Option<SessionState>,
    /// イベントを送ったユーザーへの返信
    replies: Vec<OutboundMessage>,
    /// 他のユーザーへの通知
    notices: Vec<Notification>,
}

impl Outcome {
    fn keep() -> Self {
        Self {
            next_state: None,
            replies: Vec::new(),
            notices: Vec::new(),
        }
    }

    fn to(state: SessionState) -> Self {
        Self {
            next_state: Some(state),
            ..Self::keep()
        }
    }

    fn idle() -> Self {
        Self::to(SessionState::Idle)
    }

    fn reply(mut self, message: OutboundMessage) -> Self {
        self.replies.push(message);
        self
    }

    fn notify(mut self, recipient: UserId, message: OutboundMessage) -> Self {
        self.notices.push(Notification::new(recipient, message));
        self
    }
}

/// 受信イベント処理のユースケース
pub struct HandleEventUseCase {
    sessions: Arc<dyn SessionRepository>,
    dispatcher: Arc<NotificationDispatcher>,
    clock: Arc<dyn Clock>,
    entry_point: BotEntryPoint,
    create_room: CreateRoomUseCase,
    join_room: JoinRoomUseCase,
    delete_room: DeleteRoomUseCase,
    randomize_pairs: RandomizePairsUseCase,
    room_info: Arc<RoomInfoUseCase>,
}

impl HandleEventUseCase {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        sessions: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        config: &BotConfig,
    ) -> Self {
        let dispatcher = Arc::new(NotificationDispatcher::new(message_pusher));
        Self {
            sessions,
            dispatcher: dispatcher.clone(),
            clock: clock.clone(),
            entry_point: config.entry_point.clone(),
            create_room: CreateRoomUseCase::new(rooms.clone(), clock, config.max_id_attempts),
            join_room: JoinRoomUseCase::new(rooms.clone()),
            delete_room: DeleteRoomUseCase::new(rooms.clone()),
            randomize_pairs: RandomizePairsUseCase::new(rooms.clone(), dispatcher),
            room_info: Arc::new(RoomInfoUseCase::new(rooms)),
        }
    }

    /// ルーム情報のユースケース（HTTP API と共有する）
    pub fn room_info(&self) -> Arc<RoomInfoUseCase> {
        self.room_info.clone()
    }

    /// イベントを 1 件処理し、処理後の状態を返す
    pub async fn handle(&self, event: InboundEvent) -> SessionState {
        let mut session = self.sessions.acquire(&event.user_id).await;

        let action = transition(&session.state, &event.kind);
        tracing::debug!(
            "'{}' in state '{}': {:?}",
            event.user_id,
            session.state.name(),
            action
        );

        let outcome = self.execute(&session.state, action, &event).await;
        if let Some(next_state) = outcome.next_state {
            session.state = next_state;
        }
        session.touch(self.now());
        let state = session.state.clone();

        let mut notifications: Vec<Notification> = outcome
            .replies
            .into_iter()
            .map(|message| Notification::new(event.user_id.clone(), message))
            .collect();
        notifications.extend(outcome.notices);
        self.dispatcher.deliver_all(notifications).await;
        drop(session);

        let purged = self.sessions.purge_expired().await;
        if purged > 0 {
            tracing::debug!("Purged {} expired session(s)", purged);
        }

        state
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_jst_millis())
    }

    async fn execute(
        &self,
        current: &SessionState,
        action: Action,
        event: &InboundEvent,
    ) -> Outcome {
        let user = &event.user_id;
        match action {
            Action::Greet => Outcome::keep().reply(messages::greeting()),
            Action::BeginJoin { raw_room_id } => self.begin_join(&raw_room_id, user).await,
            Action::CompleteJoin { room_id, name } => {
                self.complete_join(&room_id, user, name).await
            }
            Action::PromptDescription => {
                Outcome::to(SessionState::AwaitingDescription).reply(messages::ask_description())
            }
            Action::CreateRoom { description } => {
                self.create_room(description, user, &event.user_name).await
            }
            Action::ShowRooms => self.show_rooms(user).await,
            Action::OfferRoomsForDeletion => self.offer_rooms_for_deletion(user).await,
            Action::ConfirmDeletion { room_id } => {
                let message = messages::confirm_deletion(&room_id);
                Outcome::to(SessionState::ConfirmingDeletion { room_id }).reply(message)
            }
            Action::DeleteRoom { room_id } => self.delete_room(&room_id, user).await,
            Action::AbortDeletion => Outcome::idle().reply(messages::deletion_cancelled()),
            Action::OfferRoomsForPairing => self.offer_rooms_for_pairing(user).await,
            Action::Randomize { room_id } => self.randomize(&room_id, user).await,
            Action::Cancel if current.is_idle() => {
                Outcome::keep().reply(messages::nothing_to_cancel())
            }
            Action::Cancel => Outcome::idle().reply(messages::cancelled()),
            Action::InvalidSelection => Outcome::keep().reply(messages::invalid_selection()),
            Action::UsageHint => Outcome::keep().reply(messages::usage_hint()),
            Action::Ignore => Outcome::keep(),
        }
    }

    async fn begin_join(&self, raw_room_id: &str, user: &UserId) -> Outcome {
        match self.join_room.prepare(raw_room_id, user).await {
            Ok(room_id) => {
                Outcome::to(SessionState::AwaitingName { room_id }).reply(messages::ask_name())
            }
            Err(JoinRoomError::InvalidRoomId(_) | JoinRoomError::RoomNotFound(_)) => {
                Outcome::keep().reply(messages::room_not_found(raw_room_id))
            }
            Err(JoinRoomError::AlreadyParticipant(_)) => {
                Outcome::keep().reply(messages::already_participant())
            }
            Err(e) => failure("Failed to look up room", e, None),
        }
    }

    async fn complete_join(&self, room_id: &RoomId, user: &UserId, name: String) -> Outcome {
        let Ok(name) = DisplayName::new(name) else {
            return Outcome::keep().reply(messages::invalid_name());
        };

        match self.join_room.execute(room_id, user.clone(), name.clone()).await {
            Ok(room) => {
                let outcome = Outcome::idle().reply(messages::welcome(&room));
                if room.is_admin(user) {
                    outcome
                } else {
                    outcome.notify(
                        room.admin.clone(),
                        messages::participant_joined(&name, room_id),
                    )
                }
            }
            Err(JoinRoomError::RoomNotFound(_)) => {
                Outcome::idle().reply(messages::room_not_found(room_id.as_str()))
            }
            Err(e) => failure("Failed to join room", e, Some(SessionState::Idle)),
        }
    }

    async fn create_room(
        &self,
        description: String,
        user: &UserId,
        user_name: &DisplayName,
    ) -> Outcome {
        let Ok(description) = RoomDescription::new(description) else {
            return Outcome::keep().reply(messages::invalid_description());
        };

        match self
            .create_room
            .execute(description.clone(), user.clone(), user_name.clone())
            .await
        {
            Ok(room_id) => Outcome::idle()
                .reply(messages::room_created(&room_id, &description))
                .reply(messages::join_link(&self.entry_point, &room_id)),
            // CapacityExhausted は UseCase 内で error ログ済み
            Err(CreateRoomError::CapacityExhausted(_)) => {
                Outcome::idle().reply(messages::generic_failure())
            }
            Err(e) => failure("Failed to create room", e, Some(SessionState::Idle)),
        }
    }

    async fn show_rooms(&self, user: &UserId) -> Outcome {
        match self.room_info.rooms_of(user).await {
            Ok(rooms) if rooms.is_empty() => Outcome::keep().reply(messages::no_rooms()),
            Ok(rooms) => rooms.iter().fold(Outcome::keep(), |outcome, room| {
                outcome.reply(messages::room_info(room, user, &self.entry_point))
            }),
            Err(e) => failure("Failed to list rooms", e, None),
        }
    }

    async fn offer_rooms_for_deletion(&self, user: &UserId) -> Outcome {
        match self.delete_room.deletable_rooms(user).await {
            Ok(rooms) if rooms.is_empty() => Outcome::keep().reply(messages::no_rooms_to_delete()),
            Ok(rooms) => {
                let message = messages::choose_room_to_delete(&rooms);
                let offered = rooms.into_iter().map(|room| room.id).collect();
                Outcome::to(SessionState::ChoosingRoomToDelete { offered }).reply(message)
            }
            Err(e) => failure("Failed to list rooms for deletion", e, None),
        }
    }

    async fn delete_room(&self, room_id: &RoomId, user: &UserId) -> Outcome {
        match self.delete_room.execute(room_id, user).await {
            Ok(()) => Outcome::idle().reply(messages::room_deleted(room_id)),
            Err(DeleteRoomError::NotAdmin(_)) => Outcome::idle().reply(messages::not_admin(room_id)),
            Err(e) => failure("Failed to delete room", e, Some(SessionState::Idle)),
        }
    }

    async fn offer_rooms_for_pairing(&self, user: &UserId) -> Outcome {
        match self.randomize_pairs.pairable_rooms(user).await {
            Ok(rooms) if rooms.is_empty() => Outcome::keep().reply(messages::no_rooms_to_pair()),
            Ok(rooms) => {
                let message = messages::choose_room_to_pair(&rooms);
                let offered = rooms.into_iter().map(|room| room.id).collect();
                Outcome::to(SessionState::ChoosingRoomToPair { offered }).reply(message)
            }
            Err(e) => failure("Failed to list rooms for pairing", e, None),
        }
    }

    async fn randomize(&self, room_id: &RoomId, user: &UserId) -> Outcome {
        match self.randomize_pairs.execute(room_id, user).await {
            Ok(outcome) => Outcome::idle().reply(messages::pairing_summary(
                room_id,
                outcome.report.delivered_count(),
                outcome.report.attempted(),
            )),
            Err(RandomizePairsError::Pairing(_)) => {
                Outcome::idle().reply(messages::not_enough_participants())
            }
            Err(RandomizePairsError::RoomNotFound(_)) => {
                Outcome::idle().reply(messages::room_not_found(room_id.as_str()))
            }
            Err(RandomizePairsError::NotAdmin(_)) => {
                Outcome::idle().reply(messages::not_admin(room_id))
            }
            Err(e) => failure("Failed to randomize pairs", e, Some(SessionState::Idle)),
        }
    }
}

/// ストレージ障害などの想定外の失敗（ログを残して汎用の返信を返す）
fn failure(context: &str, error: impl Display, next_state: Option<SessionState>) -> Outcome {
    tracing::error!("{}: {}", context, error);
    Outcome {
        next_state,
        ..Outcome::keep()
    }
    .reply(messages::generic_failure())
}
