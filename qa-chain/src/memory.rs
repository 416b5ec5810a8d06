//! Bounded, session-scoped conversation memory.
//!
//! Conversation state is keyed by a caller-supplied session identifier so
//! concurrent conversations cannot interleave. Memory is process-local only;
//! nothing survives a restart.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::RwLock;

/// Number of prior turns kept per session.
pub const WINDOW_TURNS: usize = 3;

/// Ordered window of prior `(question, answer)` turns, bounded to the last
/// [`WINDOW_TURNS`].
#[derive(Debug, Clone, Default)]
pub struct ConversationWindow {
    turns: VecDeque<(String, String)>,
}

impl ConversationWindow {
    /// Appends a turn, dropping the oldest once the window is full.
    pub fn push(&mut self, question: String, answer: String) {
        self.turns.push_back((question, answer));
        while self.turns.len() > WINDOW_TURNS {
            self.turns.pop_front();
        }
    }

    /// Iterates turns oldest-first.
    pub fn turns(&self) -> impl Iterator<Item = &(String, String)> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Session-keyed conversation memory shared across request handlers.
///
/// Cheap to clone; clones share the same underlying map.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, ConversationWindow>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the session's window (empty for new sessions).
    pub async fn window(&self, session: &str) -> ConversationWindow {
        self.inner
            .read()
            .await
            .get(session)
            .cloned()
            .unwrap_or_default()
    }

    /// Appends a completed turn to the session's window, creating the
    /// session on first use.
    pub async fn append(&self, session: &str, question: String, answer: String) {
        let mut map = self.inner.write().await;
        map.entry(session.to_string())
            .or_default()
            .push(question, answer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_bounded_and_drops_oldest() {
        let mut w = ConversationWindow::default();
        for i in 0..5 {
            w.push(format!("q{i}"), format!("a{i}"));
        }
        assert_eq!(w.len(), WINDOW_TURNS);
        let firsts: Vec<&str> = w.turns().map(|(q, _)| q.as_str()).collect();
        assert_eq!(firsts, ["q2", "q3", "q4"]);
    }

    #[tokio::test]
    async fn sessions_do_not_share_state() {
        let store = SessionStore::new();
        store.append("alice", "q1".into(), "a1".into()).await;
        store.append("bob", "q2".into(), "a2".into()).await;

        let alice = store.window("alice").await;
        let bob = store.window("bob").await;
        assert_eq!(alice.len(), 1);
        assert_eq!(bob.len(), 1);
        assert_eq!(alice.turns().next().unwrap().0, "q1");
        assert_eq!(bob.turns().next().unwrap().0, "q2");
    }

    #[tokio::test]
    async fn unknown_session_starts_empty() {
        let store = SessionStore::new();
        assert!(store.window("nobody").await.is_empty());
    }
}
