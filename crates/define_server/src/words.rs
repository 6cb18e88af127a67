//! Word sourcing behind a swappable interface.
//!
//! Which word a new session targets is the source's policy, not the
//! engine's: the database-backed source supports a daily assignment or a
//! uniformly random pick, and the builtin source serves an embedded list
//! for demo runs and tests.

use chrono::Utc;
use define_engine::Word;
use derive_more::{Display, Error, From};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, GameRepository};

/// Errors produced by word source adapters.
#[derive(Debug, Clone, Display, Error, From)]
pub enum WordSourceError {
    /// The source has no words to serve.
    #[display("word pool is empty")]
    NoWords,
    /// The backing database failed.
    #[display("{_0}")]
    #[from]
    Db(DbError),
}

/// Supplies target words for new sessions.
pub trait WordSource: Send + Sync {
    /// Picks the next word according to the source's policy.
    ///
    /// # Errors
    ///
    /// Returns [`WordSourceError::NoWords`] when the pool is exhausted, or
    /// a backend error.
    fn next_word(&self) -> Result<Word, WordSourceError>;

    /// Fetches a specific word by id.
    ///
    /// # Errors
    ///
    /// Returns a backend error; a missing word is `Ok(None)`.
    fn word_by_id(&self, word_id: &str) -> Result<Option<Word>, WordSourceError>;

    /// Notes that a word's game finished, for usage-based rotation.
    ///
    /// Sources without usage tracking ignore this.
    ///
    /// # Errors
    ///
    /// Returns a backend error.
    fn mark_used(&self, word_id: &str) -> Result<(), WordSourceError> {
        let _ = word_id;
        Ok(())
    }
}

/// Word selection policy for the database-backed source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordPolicy {
    /// One word per calendar day, assigned on first request.
    #[default]
    Daily,
    /// A uniformly random word per session.
    Random,
}

/// Word source backed by the SQLite word pool.
#[derive(Debug, Clone)]
pub struct DbWordSource {
    repository: GameRepository,
    policy: WordPolicy,
}

impl DbWordSource {
    /// Creates a source over the given repository with the given policy.
    #[instrument(skip(repository))]
    pub fn new(repository: GameRepository, policy: WordPolicy) -> Self {
        info!(?policy, "Creating database word source");
        Self { repository, policy }
    }
}

impl WordSource for DbWordSource {
    #[instrument(skip(self))]
    fn next_word(&self) -> Result<Word, WordSourceError> {
        match self.policy {
            WordPolicy::Daily => {
                let today = Utc::now().format("%Y-%m-%d").to_string();
                if let Some(word) = self.repository.daily_word(&today)? {
                    debug!(date = %today, word_id = %word.id(), "Serving assigned daily word");
                    return Ok(word);
                }
                self.repository
                    .assign_daily_word(&today)?
                    .ok_or(WordSourceError::NoWords)
            }
            WordPolicy::Random => self
                .repository
                .random_word()?
                .ok_or(WordSourceError::NoWords),
        }
    }

    #[instrument(skip(self))]
    fn word_by_id(&self, word_id: &str) -> Result<Option<Word>, WordSourceError> {
        Ok(self.repository.word_by_id(word_id)?)
    }

    #[instrument(skip(self))]
    fn mark_used(&self, word_id: &str) -> Result<(), WordSourceError> {
        Ok(self.repository.mark_word_used(word_id)?)
    }
}

/// Word source serving an embedded list, for demo runs and tests.
///
/// Picks a random word per session and tracks nothing.
#[derive(Debug, Clone)]
pub struct BuiltinWordSource {
    words: Vec<Word>,
}

impl BuiltinWordSource {
    /// Creates a source over the embedded demo list.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating builtin word source");
        Self {
            words: builtin_words(),
        }
    }

    /// Creates a source over the given words (test seam).
    pub fn from_words(words: Vec<Word>) -> Self {
        Self { words }
    }
}

impl Default for BuiltinWordSource {
    fn default() -> Self {
        Self::new()
    }
}

impl WordSource for BuiltinWordSource {
    #[instrument(skip(self))]
    fn next_word(&self) -> Result<Word, WordSourceError> {
        if self.words.is_empty() {
            warn!("Builtin word list is empty");
            return Err(WordSourceError::NoWords);
        }
        let index = rand::rng().random_range(0..self.words.len());
        Ok(self.words[index].clone())
    }

    #[instrument(skip(self))]
    fn word_by_id(&self, word_id: &str) -> Result<Option<Word>, WordSourceError> {
        Ok(self.words.iter().find(|w| w.id() == word_id).cloned())
    }
}

/// The embedded demo word list.
fn builtin_words() -> Vec<Word> {
    let entries = [
        Word::new("builtin-1", "define", "to state the precise meaning of")
            .map(|w| {
                w.with_etymology("from Latin definire, to set bounds to")
                    .with_sentence("It is hard to define what makes a melody memorable.")
                    .with_equivalents(vec!["specify".to_string(), "delineate".to_string()])
            }),
        Word::new("builtin-2", "lexicon", "the vocabulary of a language or field")
            .map(|w| {
                w.with_etymology("from Greek lexikon (biblion), word (book)")
                    .with_sentence("The jargon entered the general lexicon within a decade.")
                    .with_equivalents(vec!["vocabulary".to_string(), "glossary".to_string()])
            }),
        Word::new("builtin-3", "ephemeral", "lasting for a very short time")
            .map(|w| {
                w.with_etymology("from Greek ephēmeros, lasting a day")
                    .with_sentence("Fame on the feed is ephemeral.")
                    .with_equivalents(vec!["fleeting".to_string(), "transient".to_string()])
            }),
        Word::new("builtin-4", "quixotic", "exceedingly idealistic and impractical")
            .map(|w| {
                w.with_etymology("after Don Quixote, hero of Cervantes' novel")
                    .with_sentence("A quixotic plan to pave the town square with books.")
                    .with_equivalents(vec!["idealistic".to_string(), "impracticable".to_string()])
            }),
        Word::new("builtin-5", "laconic", "using very few words")
            .map(|w| {
                w.with_etymology("from Greek Lakōnikos, Spartan")
                    .with_sentence("Her laconic reply ended the negotiation.")
                    .with_equivalents(vec!["terse".to_string(), "brusque".to_string()])
            }),
        Word::new("builtin-6", "serendipity", "finding good things without looking for them")
            .map(|w| {
                w.with_etymology("coined by Horace Walpole after The Three Princes of Serendip")
                    .with_sentence("They met through pure serendipity at a bus stop.")
                    .with_equivalents(vec!["chance".to_string(), "fluke".to_string()])
            }),
    ];

    entries
        .into_iter()
        .map(|w| w.expect("builtin words are well-formed"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_list_is_valid() {
        let source = BuiltinWordSource::new();
        let word = source.next_word().unwrap();
        assert!(word.validate().is_ok());
    }

    #[test]
    fn test_builtin_lookup_by_id() {
        let source = BuiltinWordSource::new();
        let word = source.word_by_id("builtin-3").unwrap().unwrap();
        assert_eq!(word.word(), "ephemeral");
        assert!(source.word_by_id("nope").unwrap().is_none());
    }

    #[test]
    fn test_empty_builtin_source_errors() {
        let source = BuiltinWordSource::from_words(Vec::new());
        assert!(matches!(
            source.next_word(),
            Err(WordSourceError::NoWords)
        ));
    }

    #[test]
    fn test_mark_used_is_a_noop_for_builtin() {
        let source = BuiltinWordSource::new();
        assert!(source.mark_used("builtin-1").is_ok());
    }
}
