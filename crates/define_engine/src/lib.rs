//! DEFINE game session engine.
//!
//! Pure game logic for the DEFINE word-guessing game: a hidden word is
//! described by six progressively revealed clues (Definition, Etymology,
//! First letter, In-a-sentence, Number-of-letters, Equivalents) and the
//! player has six guesses to find it.
//!
//! # Architecture
//!
//! - **Matcher**: case-folded exact and fuzzy guess classification
//! - **Clues**: the fixed revelation order and per-clue statuses
//! - **Session**: the state machine that consumes guesses and terminates
//!   exactly once as won or lost
//! - **Invariants**: first-class, independently testable session properties
//!
//! The engine performs no I/O and owns no storage; callers hand it a word,
//! feed it guesses, and persist the returned snapshots however they like.
//!
//! # Example
//!
//! ```
//! use define_engine::{GameSession, Word};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let word = Word::new("w1", "lexicon", "the vocabulary of a language")?;
//! let mut session = GameSession::new("session-1".to_string(), word)?;
//!
//! let outcome = session.process_guess("lexical")?;
//! assert!(!outcome.is_correct);
//! assert!(outcome.is_fuzzy);
//!
//! let outcome = session.process_guess("lexicon")?;
//! assert!(outcome.is_correct);
//! assert!(outcome.game_over);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod clues;
mod matcher;
mod session;
mod word;

// Invariants are public: callers and tests check them directly.
pub mod invariants;

// Crate-level exports - Clue revelation policy
pub use clues::{ClueMark, REVEAL_ORDER, next_clue};

// Crate-level exports - Fuzzy matcher
pub use matcher::{GuessMatch, match_guess};

// Crate-level exports - Session state machine
pub use session::{GameSession, GuessError, GuessOutcome, MAX_ATTEMPTS, SessionId};

// Crate-level exports - Word domain types
pub use word::{ClueType, ClueValue, Word, WordError, WordParts};
