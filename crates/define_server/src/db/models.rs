//! Database models and row/domain conversions.

use chrono::NaiveDateTime;
use define_engine::{Word, WordParts};
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::{DbError, schema};

/// Word database model.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::words)]
pub struct WordRow {
    id: String,
    word: String,
    definition: String,
    etymology: Option<String>,
    first_letter: String,
    in_a_sentence: Option<String>,
    number_of_letters: i32,
    equivalents: Option<String>,
    times_used: i32,
    last_used_at: Option<NaiveDateTime>,
    created_at: NaiveDateTime,
}

impl WordRow {
    /// Converts the row into the engine's validated word type.
    ///
    /// The `equivalents` column stores a JSON-encoded string list.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the JSON is malformed or the row fails the
    /// engine's word validation (first letter / letter count drift).
    #[instrument(skip(self), fields(word_id = %self.id))]
    pub fn into_word(self) -> Result<Word, DbError> {
        let equivalents = self
            .equivalents
            .as_deref()
            .map(serde_json::from_str::<Vec<String>>)
            .transpose()
            .map_err(|e| DbError::new(format!("Invalid equivalents for '{}': {}", self.id, e)))?;

        let parts = WordParts {
            id: self.id.clone(),
            word: self.word,
            definition: self.definition,
            etymology: self.etymology,
            first_letter: self.first_letter.chars().next(),
            in_a_sentence: self.in_a_sentence,
            number_of_letters: Some(self.number_of_letters as usize),
            equivalents,
        };

        Word::try_from(parts).map_err(|e| DbError::new(format!("Invalid word row: {}", e)))
    }
}

/// Insertable word model.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::words)]
pub struct NewWordRow {
    id: String,
    word: String,
    definition: String,
    etymology: Option<String>,
    first_letter: String,
    in_a_sentence: Option<String>,
    number_of_letters: i32,
    equivalents: Option<String>,
}

impl NewWordRow {
    /// Builds an insertable row from a validated engine word.
    #[instrument(skip(word), fields(word_id = %word.id()))]
    pub fn from_word(word: &Word) -> Result<Self, DbError> {
        let equivalents = word
            .equivalents()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DbError::new(format!("Failed to encode equivalents: {}", e)))?;

        Ok(Self::new(
            word.id().to_string(),
            word.word().to_string(),
            word.definition().to_string(),
            word.etymology().map(str::to_string),
            word.first_letter().to_string(),
            word.in_a_sentence().map(str::to_string),
            word.number_of_letters() as i32,
            equivalents,
        ))
    }
}

/// Daily word assignment model.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters, Insertable, new)]
#[diesel(table_name = schema::daily_words)]
#[diesel(primary_key(assigned_date))]
pub struct DailyWordRow {
    assigned_date: String,
    word_id: String,
}

/// Completed game database model.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters)]
#[diesel(table_name = schema::game_results)]
#[diesel(belongs_to(WordRow, foreign_key = word_id))]
pub struct GameResultRow {
    id: i32,
    session_id: String,
    username: Option<String>,
    word_id: String,
    word: String,
    guesses_used: i32,
    time_taken_ms: i64,
    won: bool,
    played_at: NaiveDateTime,
}

/// Insertable game result model for recording finished sessions.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::game_results)]
pub struct NewGameResult {
    session_id: String,
    username: Option<String>,
    word_id: String,
    word: String,
    guesses_used: i32,
    time_taken_ms: i64,
    won: bool,
}
