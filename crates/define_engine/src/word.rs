//! Core domain types for the DEFINE word game.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The six clue categories, in canonical reveal order.
///
/// The variant names are the wire codes: `D`efinition, `E`tymology,
/// `F`irst letter, `I`n a sentence, `N`umber of letters, `E2` equivalents.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum ClueType {
    /// Definition (visible from session creation).
    D,
    /// Etymology.
    E,
    /// First letter.
    F,
    /// Example sentence using the word.
    I,
    /// Number of letters.
    N,
    /// Equivalents (synonyms).
    E2,
}

/// The value of a single clue, as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ClueValue {
    /// Free-text clue (definition, etymology, sentence, first letter).
    Text(String),
    /// Numeric clue (letter count).
    Count(usize),
    /// List clue (equivalents).
    List(Vec<String>),
}

/// Errors produced when constructing or validating a [`Word`].
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum WordError {
    /// The headword is empty after trimming.
    #[display("word text must not be empty")]
    EmptyWord,
    /// The definition clue is empty.
    #[display("definition must not be empty for '{word}'")]
    EmptyDefinition {
        /// The offending headword.
        word: String,
    },
    /// The stored first letter does not match the headword.
    #[display("first letter '{first_letter}' does not match word '{word}'")]
    FirstLetterMismatch {
        /// The headword.
        word: String,
        /// The stored first-letter clue.
        first_letter: char,
    },
    /// The stored letter count does not match the headword.
    #[display("letter count {number_of_letters} does not match word '{word}'")]
    LetterCountMismatch {
        /// The headword.
        word: String,
        /// The stored letter-count clue.
        number_of_letters: usize,
    },
}

/// Unvalidated word fields as they arrive from storage or import.
///
/// Adapters build one of these from a database row or payload, then convert
/// with [`Word::try_from`] to get validation of the derivable clues.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordParts {
    /// Word identifier.
    pub id: String,
    /// The headword.
    pub word: String,
    /// Definition clue.
    pub definition: String,
    /// Etymology clue, if known.
    pub etymology: Option<String>,
    /// First-letter clue; derived from the headword when absent.
    pub first_letter: Option<char>,
    /// Example-sentence clue, if known.
    pub in_a_sentence: Option<String>,
    /// Letter-count clue; derived from the headword when absent.
    pub number_of_letters: Option<usize>,
    /// Equivalents clue, if known.
    pub equivalents: Option<Vec<String>>,
}

/// A target word and its six clue values, immutable for the life of a session.
///
/// The headword is stored in its case-insensitive canonical form (lowercase).
/// The first-letter and letter-count clues are derivable from the headword
/// and are guaranteed consistent with it by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    id: String,
    word: String,
    definition: String,
    etymology: Option<String>,
    first_letter: char,
    in_a_sentence: Option<String>,
    number_of_letters: usize,
    equivalents: Option<Vec<String>>,
}

impl Word {
    /// Creates a word, deriving the first-letter and letter-count clues.
    ///
    /// The headword is trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`WordError`] if the headword or definition is empty.
    #[instrument(skip(id, word, definition))]
    pub fn new(
        id: impl Into<String>,
        word: impl Into<String>,
        definition: impl Into<String>,
    ) -> Result<Self, WordError> {
        let word = word.into().trim().to_lowercase();
        let definition = definition.into();

        let first_letter = word.chars().next().ok_or(WordError::EmptyWord)?;
        if definition.trim().is_empty() {
            return Err(WordError::EmptyDefinition { word });
        }
        let number_of_letters = word.chars().count();

        Ok(Self {
            id: id.into(),
            word,
            definition,
            etymology: None,
            first_letter,
            in_a_sentence: None,
            number_of_letters,
            equivalents: None,
        })
    }

    /// Sets the etymology clue.
    pub fn with_etymology(mut self, etymology: impl Into<String>) -> Self {
        self.etymology = Some(etymology.into());
        self
    }

    /// Sets the example-sentence clue.
    pub fn with_sentence(mut self, sentence: impl Into<String>) -> Self {
        self.in_a_sentence = Some(sentence.into());
        self
    }

    /// Sets the equivalents clue.
    pub fn with_equivalents(mut self, equivalents: Vec<String>) -> Self {
        self.equivalents = Some(equivalents);
        self
    }

    /// Checks that the derivable clues still agree with the headword.
    ///
    /// Words built through [`Word::new`] always pass; this guards values that
    /// arrived through deserialization or [`WordParts`].
    ///
    /// # Errors
    ///
    /// Returns [`WordError`] naming the inconsistent clue.
    pub fn validate(&self) -> Result<(), WordError> {
        let Some(first) = self.word.chars().next() else {
            return Err(WordError::EmptyWord);
        };
        if self.definition.trim().is_empty() {
            return Err(WordError::EmptyDefinition {
                word: self.word.clone(),
            });
        }
        if self.first_letter != first {
            return Err(WordError::FirstLetterMismatch {
                word: self.word.clone(),
                first_letter: self.first_letter,
            });
        }
        if self.number_of_letters != self.word.chars().count() {
            return Err(WordError::LetterCountMismatch {
                word: self.word.clone(),
                number_of_letters: self.number_of_letters,
            });
        }
        Ok(())
    }

    /// Returns the clue value for the given clue type.
    ///
    /// `None` means the word has no value for an optional clue.
    pub fn clue_value(&self, clue: ClueType) -> Option<ClueValue> {
        match clue {
            ClueType::D => Some(ClueValue::Text(self.definition.clone())),
            ClueType::E => self.etymology.clone().map(ClueValue::Text),
            ClueType::F => Some(ClueValue::Text(self.first_letter.to_string())),
            ClueType::I => self.in_a_sentence.clone().map(ClueValue::Text),
            ClueType::N => Some(ClueValue::Count(self.number_of_letters)),
            ClueType::E2 => self.equivalents.clone().map(ClueValue::List),
        }
    }

    /// Word identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The headword in canonical lowercase form.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Definition clue.
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Etymology clue, if known.
    pub fn etymology(&self) -> Option<&str> {
        self.etymology.as_deref()
    }

    /// First-letter clue.
    pub fn first_letter(&self) -> char {
        self.first_letter
    }

    /// Example-sentence clue, if known.
    pub fn in_a_sentence(&self) -> Option<&str> {
        self.in_a_sentence.as_deref()
    }

    /// Letter-count clue.
    pub fn number_of_letters(&self) -> usize {
        self.number_of_letters
    }

    /// Equivalents clue, if known.
    pub fn equivalents(&self) -> Option<&[String]> {
        self.equivalents.as_deref()
    }
}

impl TryFrom<WordParts> for Word {
    type Error = WordError;

    /// Builds a validated word from raw parts.
    ///
    /// Supplied first-letter and letter-count values must match the headword;
    /// absent ones are derived.
    fn try_from(parts: WordParts) -> Result<Self, WordError> {
        let mut word = Word::new(parts.id, parts.word, parts.definition)?;

        if let Some(first_letter) = parts.first_letter {
            if first_letter != word.first_letter {
                return Err(WordError::FirstLetterMismatch {
                    word: word.word,
                    first_letter,
                });
            }
        }
        if let Some(number_of_letters) = parts.number_of_letters {
            if number_of_letters != word.number_of_letters {
                return Err(WordError::LetterCountMismatch {
                    word: word.word,
                    number_of_letters,
                });
            }
        }

        word.etymology = parts.etymology;
        word.in_a_sentence = parts.in_a_sentence;
        word.equivalents = parts.equivalents;
        Ok(word)
    }
}
