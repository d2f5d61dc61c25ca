use crate::domain::history::HistoryEntry;
use moka::future::Cache;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

const MAX_SESSIONS: u64 = 10_000;

type SessionHistory = Arc<Mutex<VecDeque<HistoryEntry>>>;

/// In-memory, per-session store of the most recent translations.
/// Nothing is persisted; idle sessions are dropped by the cache.
pub struct HistoryRepository {
    sessions: Cache<Uuid, SessionHistory>,
    limit: usize,
}

impl HistoryRepository {
    pub fn new(limit: usize, session_idle: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(MAX_SESSIONS)
            .time_to_idle(session_idle)
            .build();

        Self { sessions, limit }
    }

    /// Push an entry, keeping only the newest `limit` entries of the session
    pub async fn push(&self, session_id: Uuid, entry: HistoryEntry) {
        let history = self
            .sessions
            .get_with(session_id, async { Arc::new(Mutex::new(VecDeque::new())) })
            .await;

        let mut entries = history.lock();
        entries.push_front(entry);
        entries.truncate(self.limit);
    }

    /// Entries of a session, newest first
    pub async fn list(&self, session_id: Uuid) -> Vec<HistoryEntry> {
        match self.sessions.get(&session_id).await {
            Some(history) => history.lock().iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    pub async fn clear(&self, session_id: Uuid) {
        self.sessions.invalidate(&session_id).await;
    }
}
