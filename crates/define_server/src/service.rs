//! Game orchestration: sessions in, guesses through the engine, outcomes out.
//!
//! The service owns nothing but its collaborators. Each guess runs against
//! an exclusively held session snapshot from the store, and the full next
//! snapshot is persisted before the response is returned. The engine
//! computation is never re-run on persistence failure.

use define_engine::{ClueMark, ClueType, ClueValue, GameSession, GuessError, GuessOutcome, Word};
use derive_more::{Display, Error, From};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::sink::{CompletedGame, StatsSink};
use crate::store::{SessionStore, StoreError};
use crate::words::{WordSource, WordSourceError};

/// Errors surfaced to the transport layer.
#[derive(Debug, Display, Error, From)]
pub enum ServiceError {
    /// No session exists under the given id.
    #[display("session '{session_id}' not found")]
    SessionNotFound {
        /// The id that missed.
        session_id: String,
    },
    /// No word exists under the requested id.
    #[display("word '{word_id}' not found")]
    UnknownWord {
        /// The id that missed.
        word_id: String,
    },
    /// The engine rejected the request.
    #[display("{_0}")]
    #[from]
    Game(GuessError),
    /// The session store failed.
    #[display("{_0}")]
    #[from]
    Store(StoreError),
    /// The word source failed.
    #[display("{_0}")]
    #[from]
    Words(WordSourceError),
}

/// A revealed clue with its value and judged status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealedClue {
    /// Which clue.
    pub clue: ClueType,
    /// The clue's value; `None` when the word has no value for it.
    pub value: Option<ClueValue>,
    /// Status from guesses judged while this clue was current.
    pub status: ClueMark,
}

/// Client-facing session snapshot. Never includes the target word while the
/// game is live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    /// Session id.
    pub session_id: String,
    /// Guesses made so far, oldest first.
    pub attempts: Vec<String>,
    /// Clues revealed so far, in reveal order, with values and statuses.
    pub revealed: Vec<RevealedClue>,
    /// Guesses remaining.
    pub remaining_guesses: usize,
    /// Whether the session has terminated.
    pub is_complete: bool,
    /// Whether the word was found; meaningful only once complete.
    pub is_won: bool,
    /// The target word, present only once the session is complete.
    pub revealed_word: Option<String>,
}

impl SessionView {
    fn from_session(session: &GameSession) -> Self {
        let revealed = session
            .revealed_clues()
            .iter()
            .map(|&clue| RevealedClue {
                clue,
                value: session.word().clue_value(clue),
                status: session.status_of(clue),
            })
            .collect();

        Self {
            session_id: session.id().to_string(),
            attempts: session.attempts().to_vec(),
            revealed,
            remaining_guesses: define_engine::MAX_ATTEMPTS - session.attempts().len(),
            is_complete: session.is_complete(),
            is_won: session.is_won(),
            revealed_word: session
                .is_complete()
                .then(|| session.word().word().to_string()),
        }
    }
}

/// Result of one processed guess, with the updated session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessView {
    /// The engine's verdict for this guess.
    #[serde(flatten)]
    pub outcome: GuessOutcome,
    /// The session after the guess.
    pub session: SessionView,
}

/// Orchestrates the engine against the configured collaborators.
#[derive(Clone)]
pub struct GameService {
    store: Arc<dyn SessionStore>,
    words: Arc<dyn WordSource>,
    sink: Arc<dyn StatsSink>,
}

impl GameService {
    /// Creates a service over the given adapters.
    pub fn new(
        store: Arc<dyn SessionStore>,
        words: Arc<dyn WordSource>,
        sink: Arc<dyn StatsSink>,
    ) -> Self {
        Self { store, words, sink }
    }

    /// Starts a new session, targeting a specific word when `word_id` is
    /// given and the source's pick otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::UnknownWord`] for a bad `word_id`, the
    /// engine's word-validation error, or an adapter failure.
    #[instrument(skip(self))]
    pub fn create_session(
        &self,
        word_id: Option<&str>,
        username: Option<String>,
    ) -> Result<SessionView, ServiceError> {
        let word = self.resolve_word(word_id)?;

        let session_id = Uuid::new_v4().to_string();
        let mut session = GameSession::new(session_id.clone(), word)?;
        if let Some(username) = username {
            session = session.with_username(username);
        }

        self.store.put(session.clone())?;
        info!(session_id = %session_id, word_id = %session.word().id(), "Session created");
        Ok(SessionView::from_session(&session))
    }

    /// Processes one guess against the stored session.
    ///
    /// On completion the word's usage counter is bumped and the outcome is
    /// emitted to the stats sink; both are best-effort and never fail the
    /// response.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::SessionNotFound`] for an unknown id, the
    /// engine's guess errors, or a store failure.
    #[instrument(skip(self, guess))]
    pub fn process_guess(&self, session_id: &str, guess: &str) -> Result<GuessView, ServiceError> {
        let mut session =
            self.store
                .get(session_id)?
                .ok_or_else(|| ServiceError::SessionNotFound {
                    session_id: session_id.to_string(),
                })?;

        let outcome = session.process_guess(guess)?;
        self.store.put(session.clone())?;

        if outcome.game_over {
            self.report_completion(&session);
        }

        Ok(GuessView {
            outcome,
            session: SessionView::from_session(&session),
        })
    }

    /// Fetches the current view of a session, for reconnecting clients.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::SessionNotFound`] for an unknown id or a
    /// store failure.
    #[instrument(skip(self))]
    pub fn session(&self, session_id: &str) -> Result<SessionView, ServiceError> {
        let session = self
            .store
            .get(session_id)?
            .ok_or_else(|| ServiceError::SessionNotFound {
                session_id: session_id.to_string(),
            })?;
        Ok(SessionView::from_session(&session))
    }

    /// Resolves the target word for a new session.
    fn resolve_word(&self, word_id: Option<&str>) -> Result<Word, ServiceError> {
        match word_id {
            Some(id) => self
                .words
                .word_by_id(id)?
                .ok_or_else(|| ServiceError::UnknownWord {
                    word_id: id.to_string(),
                }),
            None => Ok(self.words.next_word()?),
        }
    }

    /// Best-effort completion bookkeeping: usage counter and stats sink.
    fn report_completion(&self, session: &GameSession) {
        if let Err(e) = self.words.mark_used(session.word().id()) {
            warn!(word_id = %session.word().id(), error = %e, "Failed to mark word used");
        }

        let game = CompletedGame {
            username: session.username().map(str::to_string),
            word_id: session.word().id().to_string(),
            word: session.word().word().to_string(),
            session_id: session.id().to_string(),
            attempts_used: session.attempts().len(),
            time_taken_ms: session.time_taken_ms().unwrap_or(0),
            won: session.is_won(),
        };

        if let Err(e) = self.sink.record(&game) {
            warn!(session_id = %session.id(), error = %e, "Failed to record game result");
        } else {
            info!(
                session_id = %session.id(),
                won = game.won,
                attempts = game.attempts_used,
                "Game result recorded"
            );
        }
    }
}
