//! Outcome reporting behind a swappable interface.
//!
//! When a session completes, the service emits one [`CompletedGame`] to the
//! configured sink. Recording is fire-and-forget: a sink failure is logged
//! and never fails the guess response already computed.

use derive_more::{Display, Error, From};
use tracing::{debug, instrument};

use crate::db::{DbError, GameRepository, NewGameResult};

/// Errors produced by stats sink adapters.
#[derive(Debug, Clone, Display, Error, From)]
pub enum SinkError {
    /// The backing database failed.
    #[display("{_0}")]
    #[from]
    Db(DbError),
}

/// A finished session's outcome, as reported to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedGame {
    /// Player name, when one was attached to the session.
    pub username: Option<String>,
    /// Id of the target word.
    pub word_id: String,
    /// The target word itself.
    pub word: String,
    /// Session id, for traceability.
    pub session_id: String,
    /// Guesses consumed.
    pub attempts_used: usize,
    /// Wall-clock duration from session start to completion.
    pub time_taken_ms: i64,
    /// Whether the word was found.
    pub won: bool,
}

/// Receives finished sessions for later aggregation.
pub trait StatsSink: Send + Sync {
    /// Records one finished session.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the backend fails; callers treat this as
    /// non-fatal.
    fn record(&self, game: &CompletedGame) -> Result<(), SinkError>;
}

/// Sink writing to the `game_results` table.
#[derive(Debug, Clone)]
pub struct DbStatsSink {
    repository: GameRepository,
}

impl DbStatsSink {
    /// Creates a sink over the given repository.
    pub fn new(repository: GameRepository) -> Self {
        Self { repository }
    }
}

impl StatsSink for DbStatsSink {
    #[instrument(skip(self, game), fields(session_id = %game.session_id, won = game.won))]
    fn record(&self, game: &CompletedGame) -> Result<(), SinkError> {
        let result = NewGameResult::new(
            game.session_id.clone(),
            game.username.clone(),
            game.word_id.clone(),
            game.word.clone(),
            game.attempts_used as i32,
            game.time_taken_ms,
            game.won,
        );
        self.repository.record_result(result)?;
        Ok(())
    }
}

/// Sink that discards everything.
///
/// Used when the leaderboard is disabled or no database is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStatsSink;

impl StatsSink for NullStatsSink {
    #[instrument(skip(self, game), fields(session_id = %game.session_id))]
    fn record(&self, game: &CompletedGame) -> Result<(), SinkError> {
        debug!(won = game.won, "Discarding game result (stats sink disabled)");
        Ok(())
    }
}
