//! InMemory Session Repository 実装
//!
//! ユーザーごとに `Arc<Mutex<Session>>` を保持し、イベント処理中はその Mutex を
//! 保持し続けることで、同じユーザーのイベントを直列化します。
//! 異なるユーザーのイベントは互いに待ちません。
//!
//! タイマーは使いません。期限切れの判定はアクセス時に行います。

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use hohoho_shared::time::Clock;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{Session, SessionRepository, Timestamp, UserId};

/// インメモリ Session Repository 実装
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<UserId, Arc<Mutex<Session>>>>,
    clock: Arc<dyn Clock>,
    ttl_millis: i64,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    ///
    /// # Arguments
    ///
    /// * `clock` - 現在時刻の取得元
    /// * `ttl` - 最終操作からこの時間が経過したセッションは Idle に戻す
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            clock,
            ttl_millis: i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX),
        }
    }

    /// 保持しているセッション数
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_jst_millis())
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn acquire(&self, user_id: &UserId) -> OwnedMutexGuard<Session> {
        let now = self.now();
        let entry = {
            let mut sessions = self.sessions.lock().await;
            sessions
                .entry(user_id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(Session::new(user_id.clone(), now))))
                .clone()
        };

        let mut session = entry.lock_owned().await;
        let now = self.now();
        if !session.state.is_idle() && session.is_expired(now, self.ttl_millis) {
            tracing::debug!(
                "Session of '{}' expired in state '{}', resetting to idle",
                user_id,
                session.state.name()
            );
            session.reset();
        }
        session
    }

    async fn purge_expired(&self) -> usize {
        let now = self.now();
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();

        // 他のタスクが Arc を複製していれば処理中なので残す
        sessions.retain(|_, entry| {
            if Arc::strong_count(entry) > 1 {
                return true;
            }
            match entry.try_lock() {
                Ok(session) => !session.is_expired(now, self.ttl_millis),
                Err(_) => true,
            }
        });

        before - sessions.len()
    }
}
