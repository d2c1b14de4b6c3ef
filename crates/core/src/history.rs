//! Per-session dialogue history.
//!
//! The `HistoryStore` owns the process-wide session map. Each entry is the
//! full, untruncated turn list for one tutoring session, guarded by its own
//! async mutex so that steps on the same session identifier run strictly
//! one at a time while steps on different sessions proceed in parallel.
//! Windowing bounds what is sent to the model on each call; the stored
//! history itself is never truncated.

use crate::turn::{Role, Turn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// A session's full turn list behind its per-session lock.
pub type SessionHistory = Arc<Mutex<Vec<Turn>>>;

/// Owns the mapping from session identifier to dialogue history.
///
/// Constructed once at startup and passed to the orchestrator; entries are
/// created implicitly on first use and removed exactly when a step reports
/// the problem solved.
pub struct HistoryStore {
    system_prompt: String,
    window_turns: usize,
    sessions: Mutex<HashMap<String, SessionHistory>>,
}

impl HistoryStore {
    /// Creates a store whose fresh sessions open with `system_prompt` and
    /// whose gateway calls carry at most `window_turns` user/assistant
    /// exchanges of context.
    pub fn new(system_prompt: impl Into<String>, window_turns: usize) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            window_turns,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the history for `session_id`, initializing a fresh one
    /// (a single system turn) if the session does not exist yet.
    pub async fn checkout(&self, session_id: &str) -> SessionHistory {
        let mut sessions = self.sessions.lock().await;
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(vec![Turn::system(&self.system_prompt)])))
            .clone()
    }

    /// Locks the history for `session_id`, initializing it if needed.
    ///
    /// A step holds the returned guard end to end; that is what serializes
    /// concurrent steps on one session identifier. Because a completing
    /// step removes the entry while a waiter may already hold a handle to
    /// it, the guard is only returned once the locked entry is confirmed
    /// to still be the one the map hands out; a handle orphaned by
    /// `remove` is discarded and the checkout starts over, so a step never
    /// operates on a terminated session's memory.
    pub async fn acquire(&self, session_id: &str) -> OwnedMutexGuard<Vec<Turn>> {
        loop {
            let entry = self.checkout(session_id).await;
            let guard = entry.clone().lock_owned().await;
            let sessions = self.sessions.lock().await;
            match sessions.get(session_id) {
                Some(current) if Arc::ptr_eq(current, &entry) => return guard,
                _ => continue,
            }
        }
    }

    /// Produces the bounded view sent to the model: the first system turn
    /// (if any), then the most recent `window_turns * 2` non-system turns
    /// in their original relative order.
    pub fn window(&self, turns: &[Turn]) -> Vec<Turn> {
        let system = turns.iter().find(|t| t.role == Role::System);
        let non_system: Vec<&Turn> = turns.iter().filter(|t| t.role != Role::System).collect();
        let keep = self.window_turns * 2;
        let start = non_system.len().saturating_sub(keep);
        system
            .into_iter()
            .chain(non_system[start..].iter().copied())
            .cloned()
            .collect()
    }

    /// Deletes the session entry. The next step on the same identifier
    /// starts a brand-new session.
    pub async fn remove(&self, session_id: &str) {
        self.sessions.lock().await.remove(session_id);
    }

    /// Whether an entry exists for `session_id`.
    pub async fn contains(&self, session_id: &str) -> bool {
        self.sessions.lock().await.contains_key(session_id)
    }

    /// Number of active sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
