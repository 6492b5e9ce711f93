use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::interview::session::InterviewSession;

/// In-memory map of live interview sessions, shared across handlers.
///
/// Handlers clone a session out, release the lock, run the turn, and write
/// the result back with `replace`. The lock is never held across a provider
/// call. Sessions idle for longer than the store's TTL are dropped: a stale
/// session is evicted when it is looked up, and every insert sweeps the rest.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, InterviewSession>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn insert(&self, session: InterviewSession) {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_stale(self.ttl));
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, "evicted idle interview sessions");
        }
        sessions.insert(session.id, session);
    }

    pub async fn get(&self, id: Uuid) -> Option<InterviewSession> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(&id) {
                Some(session) if !session.is_stale(self.ttl) => return Some(session.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut sessions = self.sessions.write().await;
        // Re-check under the write lock; a concurrent turn may have touched it.
        if sessions.get(&id).is_some_and(|s| s.is_stale(self.ttl)) {
            sessions.remove(&id);
            info!(session_id = %id, "evicted idle interview session");
            return None;
        }
        sessions.get(&id).cloned()
    }

    /// Stores the result of a turn and marks the session active. Returns
    /// `false` if the session was ended while the turn was running, in which
    /// case nothing is written.
    pub async fn replace(&self, mut session: InterviewSession) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session.id) {
            Some(slot) => {
                session.touch();
                *slot = session;
                true
            }
            None => false,
        }
    }

    pub async fn remove(&self, id: Uuid) -> Option<InterviewSession> {
        self.sessions.write().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
