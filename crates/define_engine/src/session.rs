//! Game session state machine for DEFINE.
//!
//! A session starts `active` with the definition clue visible, consumes up
//! to six guesses, and terminates exactly once as won or lost. All state
//! transitions happen in [`GameSession::process_guess`]; a rejected guess
//! leaves the session untouched.

use crate::clues::{ClueMark, next_clue};
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::matcher::match_guess;
use crate::word::{ClueType, Word, WordError};
use chrono::{DateTime, Utc};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Maximum number of guesses per session.
pub const MAX_ATTEMPTS: usize = 6;

/// Errors that can occur when creating a session or processing a guess.
///
/// All variants are local validation failures: the session (if any) is left
/// unchanged and the caller can recover.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum GuessError {
    /// The session has already terminated; no further guesses are accepted.
    #[display("session is already complete")]
    SessionAlreadyComplete,
    /// The guess is empty after trimming.
    #[display("guess must not be empty")]
    EmptyGuess,
    /// The word's derivable clues are inconsistent with its headword.
    #[display("invalid word data: {_0}")]
    #[from]
    InvalidWordData(WordError),
}

/// Result of a single processed guess. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessOutcome {
    /// The guess matched the target word.
    pub is_correct: bool,
    /// The guess was close but wrong.
    pub is_fuzzy: bool,
    /// The session terminated with this guess.
    pub game_over: bool,
    /// The target word, populated only when the game is over.
    pub revealed_word: Option<String>,
    /// Guesses left after this one.
    pub remaining_guesses: usize,
    /// The clue revealed by this guess, if any.
    pub revealed_clue: Option<ClueType>,
}

/// One game of DEFINE: a target word, the guesses made against it, and the
/// clue-revelation state.
///
/// The target word never changes after creation. `attempts` is append-only
/// and chronological; `revealed_clues` grows monotonically in reveal order
/// and always contains the definition. Completion is one-way: once
/// `is_complete` is set, [`GameSession::process_guess`] rejects every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    id: SessionId,
    word: Word,
    #[serde(default)]
    username: Option<String>,
    attempts: Vec<String>,
    revealed_clues: Vec<ClueType>,
    clue_status: BTreeMap<ClueType, ClueMark>,
    is_complete: bool,
    is_won: bool,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
}

impl GameSession {
    /// Creates a new active session targeting the given word.
    ///
    /// The definition clue is revealed immediately; every clue starts
    /// [`ClueMark::Neutral`].
    ///
    /// # Errors
    ///
    /// Returns [`GuessError::InvalidWordData`] if the word's first-letter or
    /// letter-count clues disagree with its headword. Words built through
    /// [`Word::new`] always pass; this guards snapshots coming back from a
    /// store.
    #[instrument(skip(word), fields(session_id = %id, word_id = %word.id()))]
    pub fn new(id: SessionId, word: Word) -> Result<Self, GuessError> {
        word.validate()?;

        let clue_status = ClueType::iter().map(|clue| (clue, ClueMark::Neutral)).collect();

        let session = Self {
            id,
            word,
            username: None,
            attempts: Vec::new(),
            revealed_clues: vec![ClueType::D],
            clue_status,
            is_complete: false,
            is_won: false,
            start_time: Utc::now(),
            end_time: None,
        };

        info!(word_id = %session.word.id(), "Game session created");
        debug_assert!(SessionInvariants::check_all(&session).is_ok());
        Ok(session)
    }

    /// Processes one guess, advancing the state machine.
    ///
    /// A correct guess wins and completes the session; an incorrect one
    /// marks the currently visible clue ([`ClueMark::Incorrect`], or
    /// [`ClueMark::Fuzzy`] for a near miss) and then reveals the next clue.
    /// The sixth guess completes the session regardless of outcome.
    ///
    /// Each call that returns `Ok` records exactly one attempt; submitting
    /// the same guess twice records it twice.
    ///
    /// # Errors
    ///
    /// Returns [`GuessError::SessionAlreadyComplete`] after termination and
    /// [`GuessError::EmptyGuess`] for blank input. Neither mutates the
    /// session.
    #[instrument(skip(self), fields(session_id = %self.id, attempt = self.attempts.len() + 1))]
    pub fn process_guess(&mut self, raw_guess: &str) -> Result<GuessOutcome, GuessError> {
        if self.is_complete {
            warn!("Guess submitted to a completed session");
            return Err(GuessError::SessionAlreadyComplete);
        }
        if raw_guess.trim().is_empty() {
            warn!("Empty guess rejected");
            return Err(GuessError::EmptyGuess);
        }

        let matched = match_guess(raw_guess, self.word.word());
        self.attempts.push(raw_guess.to_string());

        let mut revealed_clue = None;
        if matched.exact {
            self.is_won = true;
            self.complete();
            self.mark_current_clue(ClueMark::Correct);
            info!(attempts = self.attempts.len(), "Session won");
        } else {
            // Judge the clue that was visible when the guess was made,
            // then reveal the next one.
            let mark = if matched.fuzzy {
                ClueMark::Fuzzy
            } else {
                ClueMark::Incorrect
            };
            self.mark_current_clue(mark);

            revealed_clue = next_clue(&self.revealed_clues);
            if let Some(clue) = revealed_clue {
                self.revealed_clues.push(clue);
                debug!(clue = %clue, "Clue revealed");
            }

            if self.attempts.len() == MAX_ATTEMPTS {
                self.complete();
                info!("Session lost after final guess");
            }
        }

        debug_assert!(SessionInvariants::check_all(self).is_ok());

        Ok(GuessOutcome {
            is_correct: matched.exact,
            is_fuzzy: matched.fuzzy,
            game_over: self.is_complete,
            revealed_word: self
                .is_complete
                .then(|| self.word.word().to_string()),
            remaining_guesses: MAX_ATTEMPTS - self.attempts.len(),
            revealed_clue,
        })
    }

    /// Marks the session complete and stamps the end time once.
    fn complete(&mut self) {
        self.is_complete = true;
        if self.end_time.is_none() {
            self.end_time = Some(Utc::now());
        }
    }

    /// Sets the status of the most recently revealed clue.
    fn mark_current_clue(&mut self, mark: ClueMark) {
        if let Some(current) = self.revealed_clues.last() {
            self.clue_status.insert(*current, mark);
        }
    }

    /// Attaches the player's name to the session.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Session identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The player's name, when one was attached at creation.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The target word.
    pub fn word(&self) -> &Word {
        &self.word
    }

    /// Guesses made so far, in chronological order.
    pub fn attempts(&self) -> &[String] {
        &self.attempts
    }

    /// Clues revealed so far, in reveal order.
    pub fn revealed_clues(&self) -> &[ClueType] {
        &self.revealed_clues
    }

    /// Status of every clue type.
    pub fn clue_status(&self) -> &BTreeMap<ClueType, ClueMark> {
        &self.clue_status
    }

    /// Status of one clue type.
    pub fn status_of(&self, clue: ClueType) -> ClueMark {
        self.clue_status
            .get(&clue)
            .copied()
            .unwrap_or(ClueMark::Neutral)
    }

    /// Whether the session has terminated.
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Whether the session was won; meaningful only once complete.
    pub fn is_won(&self) -> bool {
        self.is_won
    }

    /// Session start time.
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Session end time, set exactly once at completion.
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Wall-clock duration of a completed session in milliseconds.
    pub fn time_taken_ms(&self) -> Option<i64> {
        self.end_time
            .map(|end| (end - self.start_time).num_milliseconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_word() -> Word {
        Word::new("w1", "test", "a procedure to establish quality")
            .unwrap()
            .with_etymology("from Latin testum, earthen pot")
            .with_sentence("This was a test of patience.")
            .with_equivalents(vec!["trial".to_string(), "exam".to_string()])
    }

    fn session() -> GameSession {
        GameSession::new("s1".to_string(), test_word()).unwrap()
    }

    #[test]
    fn test_new_session_reveals_definition_only() {
        let session = session();
        assert_eq!(session.revealed_clues(), &[ClueType::D]);
        assert_eq!(session.status_of(ClueType::D), ClueMark::Neutral);
        assert!(!session.is_complete());
        assert!(session.attempts().is_empty());
        assert!(session.end_time().is_none());
    }

    #[test]
    fn test_inconsistent_word_fails_fast() {
        let word = test_word();
        let json = serde_json::to_string(&word).unwrap().replace("\"first_letter\":\"t\"", "\"first_letter\":\"q\"");
        let tampered: Word = serde_json::from_str(&json).unwrap();
        let result = GameSession::new("s2".to_string(), tampered);
        assert!(matches!(result, Err(GuessError::InvalidWordData(_))));
    }

    #[test]
    fn test_correct_guess_marks_current_clue() {
        let mut session = session();
        let outcome = session.process_guess("TEST").unwrap();

        assert!(outcome.is_correct);
        assert!(outcome.game_over);
        assert_eq!(outcome.revealed_word.as_deref(), Some("test"));
        assert_eq!(outcome.revealed_clue, None);
        // No new clue on a win; the definition carries the correct mark.
        assert_eq!(session.revealed_clues(), &[ClueType::D]);
        assert_eq!(session.status_of(ClueType::D), ClueMark::Correct);
        assert!(session.is_won());
        assert_eq!(session.attempts(), &["TEST".to_string()]);
    }

    #[test]
    fn test_incorrect_guess_marks_then_reveals() {
        let mut session = session();
        let outcome = session.process_guess("zzzz").unwrap();

        assert!(!outcome.is_correct);
        assert!(!outcome.is_fuzzy);
        assert!(!outcome.game_over);
        assert_eq!(outcome.revealed_word, None);
        assert_eq!(outcome.remaining_guesses, 5);
        assert_eq!(outcome.revealed_clue, Some(ClueType::E));
        // The definition was current when the guess was judged.
        assert_eq!(session.status_of(ClueType::D), ClueMark::Incorrect);
        assert_eq!(session.status_of(ClueType::E), ClueMark::Neutral);
        assert_eq!(session.revealed_clues(), &[ClueType::D, ClueType::E]);
    }

    #[test]
    fn test_fuzzy_guess_marks_fuzzy() {
        let mut session = session();
        let outcome = session.process_guess("tets").unwrap();

        assert!(!outcome.is_correct);
        assert!(outcome.is_fuzzy);
        assert_eq!(session.status_of(ClueType::D), ClueMark::Fuzzy);
    }

    #[test]
    fn test_six_strikes_reveals_everything_and_loses() {
        let mut session = session();
        let guesses = ["aaaa", "bbbb", "cccc", "dddd", "eeee", "ffff"];

        for (i, guess) in guesses.iter().enumerate() {
            let outcome = session.process_guess(guess).unwrap();
            assert_eq!(outcome.game_over, i == 5);
        }

        assert!(session.is_complete());
        assert!(!session.is_won());
        assert_eq!(session.attempts().len(), 6);
        assert_eq!(
            session.revealed_clues(),
            &[
                ClueType::D,
                ClueType::E,
                ClueType::F,
                ClueType::I,
                ClueType::N,
                ClueType::E2
            ]
        );
        assert!(session.end_time().is_some());
        assert!(session.time_taken_ms().is_some());
    }

    #[test]
    fn test_final_guess_reveals_no_clue() {
        let mut session = session();
        for guess in ["aaaa", "bbbb", "cccc", "dddd", "eeee"] {
            session.process_guess(guess).unwrap();
        }
        // All six clues are already out; the last guess has nothing to reveal.
        let outcome = session.process_guess("ffff").unwrap();
        assert_eq!(outcome.revealed_clue, None);
        assert!(outcome.game_over);
        assert_eq!(outcome.remaining_guesses, 0);
    }

    #[test]
    fn test_completed_session_rejects_guesses_without_mutation() {
        let mut session = session();
        session.process_guess("test").unwrap();

        let attempts = session.attempts().to_vec();
        let revealed = session.revealed_clues().to_vec();
        let status = session.clue_status().clone();

        let result = session.process_guess("again");
        assert_eq!(result.unwrap_err(), GuessError::SessionAlreadyComplete);
        assert_eq!(session.attempts(), attempts.as_slice());
        assert_eq!(session.revealed_clues(), revealed.as_slice());
        assert_eq!(session.clue_status(), &status);
    }

    #[test]
    fn test_empty_guess_rejected_without_mutation() {
        let mut session = session();
        let result = session.process_guess("   ");
        assert_eq!(result.unwrap_err(), GuessError::EmptyGuess);
        assert!(session.attempts().is_empty());
        assert_eq!(session.revealed_clues(), &[ClueType::D]);
    }

    #[test]
    fn test_duplicate_guesses_both_recorded() {
        let mut session = session();
        session.process_guess("wrong").unwrap();
        session.process_guess("wrong").unwrap();
        assert_eq!(session.attempts().len(), 2);
    }

    #[test]
    fn test_win_on_last_attempt() {
        let mut session = session();
        for guess in ["aaaa", "bbbb", "cccc", "dddd", "eeee"] {
            session.process_guess(guess).unwrap();
        }
        let outcome = session.process_guess("test").unwrap();
        assert!(outcome.is_correct);
        assert!(outcome.game_over);
        assert!(session.is_won());
        // The winning guess marks the last revealed clue.
        assert_eq!(session.status_of(ClueType::E2), ClueMark::Correct);
    }

    #[test]
    fn test_session_round_trips_through_serde() {
        let mut session = session();
        session.process_guess("tets").unwrap();

        let json = serde_json::to_string(&session).unwrap();
        let restored: GameSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
