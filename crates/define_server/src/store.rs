//! Session storage behind a swappable interface.
//!
//! The engine hands back a full session snapshot per transition; a store
//! only needs keyed get/put. `put` replaces the whole snapshot atomically
//! per id, which is the serialization point for concurrent guesses against
//! the same session.

use define_engine::GameSession;
use derive_more::{Display, Error};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};

/// Errors produced by session store adapters.
#[derive(Debug, Clone, Display, Error)]
#[display("Session store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Durable keyed storage for game sessions.
///
/// Implementations must make `put` atomic per session id; the engine is
/// always invoked with an exclusively held snapshot and returns the full
/// next snapshot to persist.
pub trait SessionStore: Send + Sync {
    /// Fetches the session with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails; a missing session is
    /// `Ok(None)`, not an error.
    fn get(&self, session_id: &str) -> Result<Option<GameSession>, StoreError>;

    /// Persists the session snapshot, replacing any previous state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn put(&self, session: GameSession) -> Result<(), StoreError>;
}

/// In-memory session store.
///
/// Process-lifetime storage for single-node deployments and tests. Sessions
/// are never expired here; retention is a deployment concern.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, GameSession>>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory session store");
        Self::default()
    }

    /// Number of sessions currently held.
    pub fn len(&self) -> usize {
        self.sessions.lock().expect("session store lock poisoned").len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    #[instrument(skip(self))]
    fn get(&self, session_id: &str) -> Result<Option<GameSession>, StoreError> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|_| StoreError::new("session store lock poisoned"))?;
        let session = sessions.get(session_id).cloned();

        if session.is_none() {
            debug!(session_id, "Session not found");
        }

        Ok(session)
    }

    #[instrument(skip(self, session), fields(session_id = %session.id()))]
    fn put(&self, session: GameSession) -> Result<(), StoreError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| StoreError::new("session store lock poisoned"))?;
        sessions.insert(session.id().to_string(), session);
        debug!("Session stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use define_engine::Word;

    fn session(id: &str) -> GameSession {
        let word = Word::new("w1", "test", "a trial").unwrap();
        GameSession::new(id.to_string(), word).unwrap()
    }

    #[test]
    fn test_get_missing_returns_none() {
        let store = MemorySessionStore::new();
        assert!(store.get("nope").unwrap().is_none());
    }

    #[test]
    fn test_put_then_get_round_trips() {
        let store = MemorySessionStore::new();
        let session = session("s1");
        store.put(session.clone()).unwrap();

        let loaded = store.get("s1").unwrap().unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_put_replaces_previous_snapshot() {
        let store = MemorySessionStore::new();
        let mut session = session("s1");
        store.put(session.clone()).unwrap();

        session.process_guess("wrong").unwrap();
        store.put(session.clone()).unwrap();

        let loaded = store.get("s1").unwrap().unwrap();
        assert_eq!(loaded.attempts().len(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = MemorySessionStore::new();
        store.put(session("s1")).unwrap();
        store.put(session("s2")).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.get("s1").unwrap().is_some());
        assert!(store.get("s2").unwrap().is_some());
    }
}
