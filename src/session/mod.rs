//! In-memory session history
//!
//! Sessions live for the process lifetime. Each holds its most recent
//! entries, oldest first, and is trimmed to the configured cap on every
//! append.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::RwLock;

pub mod types;
pub use types::{DataSource, SessionEntry, SessionHistory, SessionStats};

/// Shared, capped, per-session history
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, VecDeque<SessionEntry>>>>,
    max_entries: usize,
}

impl SessionStore {
    /// Create an empty store keeping at most `max_entries` per session
    pub fn new(max_entries: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_entries: max_entries.max(1),
        }
    }

    /// Append an entry, creating the session on first use
    pub async fn append(&self, session_id: &str, entry: SessionEntry) {
        let mut sessions = self.sessions.write().await;
        let history = sessions.entry(session_id.to_string()).or_default();
        history.push_back(entry);
        while history.len() > self.max_entries {
            history.pop_front();
        }
        tracing::debug!("Session {} now holds {} entries", session_id, history.len());
    }

    /// Full history for `session_id`; unknown ids yield an empty history
    pub async fn history(&self, session_id: &str) -> SessionHistory {
        let sessions = self.sessions.read().await;
        let history: Vec<SessionEntry> = sessions
            .get(session_id)
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default();

        let count = |source: DataSource| {
            history
                .iter()
                .filter(|e| e.data_source == source)
                .count()
        };

        SessionHistory {
            session_id: session_id.to_string(),
            total_queries: history.len(),
            erddap_queries: count(DataSource::Erddap),
            gemini_queries: count(DataSource::Gemini),
            history,
        }
    }

    /// Remove a session; returns whether it existed
    pub async fn clear(&self, session_id: &str) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }

    /// Counters for the health endpoint
    pub async fn stats(&self) -> SessionStats {
        let sessions = self.sessions.read().await;
        SessionStats {
            active_sessions: sessions.len(),
            total_queries: sessions.values().map(VecDeque::len).sum(),
        }
    }
}
