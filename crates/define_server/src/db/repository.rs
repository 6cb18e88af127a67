//! Database repository for words, daily assignments, and game results.

use chrono::Utc;
use define_engine::Word;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, GameResultRow, NewGameResult, NewWordRow, WordRow, schema};

/// Embedded schema migrations, applied at startup.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for word and game-result operations.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository connected to the database at the given path.
    ///
    /// Use `":memory:"` for an in-memory database (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is invalid.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Inserts a word into the pool.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the id is already taken or a database error
    /// occurs.
    #[instrument(skip(self, word), fields(word_id = %word.id()))]
    pub fn insert_word(&self, word: &Word) -> Result<(), DbError> {
        debug!("Inserting word");
        let mut conn = self.connection()?;

        let row = NewWordRow::from_word(word)?;
        diesel::insert_into(schema::words::table)
            .values(&row)
            .execute(&mut conn)?;

        info!(word_id = %word.id(), "Word inserted");
        Ok(())
    }

    /// Gets a word by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or the row is invalid.
    #[instrument(skip(self))]
    pub fn word_by_id(&self, word_id: &str) -> Result<Option<Word>, DbError> {
        debug!(word_id, "Looking up word by id");
        let mut conn = self.connection()?;

        let row = schema::words::table
            .filter(schema::words::id.eq(word_id))
            .first::<WordRow>(&mut conn)
            .optional()?;

        row.map(WordRow::into_word).transpose()
    }

    /// Picks a uniformly random word from the pool.
    ///
    /// Returns `None` when the pool is empty.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn random_word(&self) -> Result<Option<Word>, DbError> {
        let mut conn = self.connection()?;

        let count: i64 = schema::words::table.count().get_result(&mut conn)?;
        if count == 0 {
            warn!("Word pool is empty");
            return Ok(None);
        }

        let offset = rand::rng().random_range(0..count);
        let row = schema::words::table
            .order(schema::words::id.asc())
            .offset(offset)
            .first::<WordRow>(&mut conn)?;

        debug!(word_id = %row.id(), "Random word selected");
        row.into_word().map(Some)
    }

    /// Gets the word assigned to the given date, if one has been set.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn daily_word(&self, date: &str) -> Result<Option<Word>, DbError> {
        debug!(date, "Looking up daily word");
        let mut conn = self.connection()?;

        let row = schema::daily_words::table
            .inner_join(schema::words::table)
            .filter(schema::daily_words::assigned_date.eq(date))
            .select(WordRow::as_select())
            .first::<WordRow>(&mut conn)
            .optional()?;

        row.map(WordRow::into_word).transpose()
    }

    /// Assigns a word to the given date and returns it.
    ///
    /// The least-used word wins (fewest plays, then least recently played).
    /// If another writer assigns the date first, their assignment is kept
    /// and returned. Returns `None` when the pool is empty.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn assign_daily_word(&self, date: &str) -> Result<Option<Word>, DbError> {
        let mut conn = self.connection()?;

        let candidate = schema::words::table
            .order((
                schema::words::times_used.asc(),
                schema::words::last_used_at.asc(),
            ))
            .first::<WordRow>(&mut conn)
            .optional()?;

        let Some(row) = candidate else {
            warn!("Word pool is empty, cannot assign daily word");
            return Ok(None);
        };

        let assignment = crate::db::DailyWordRow::new(date.to_string(), row.id().clone());
        match diesel::insert_into(schema::daily_words::table)
            .values(&assignment)
            .execute(&mut conn)
        {
            Ok(_) => {
                info!(date, word_id = %row.id(), "Daily word assigned");
                row.into_word().map(Some)
            }
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                // Lost the race; the winner's assignment stands.
                debug!(date, "Daily word already assigned concurrently");
                self.daily_word(date)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Bumps a word's usage counters after a completed game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn mark_word_used(&self, word_id: &str) -> Result<(), DbError> {
        debug!(word_id, "Marking word as used");
        let mut conn = self.connection()?;

        diesel::update(schema::words::table.filter(schema::words::id.eq(word_id)))
            .set((
                schema::words::times_used.eq(schema::words::times_used + 1),
                schema::words::last_used_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    /// Records a finished session's outcome.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, result), fields(session_id = %result.session_id(), won = result.won()))]
    pub fn record_result(&self, result: NewGameResult) -> Result<GameResultRow, DbError> {
        debug!("Recording game result");
        let mut conn = self.connection()?;

        let row = diesel::insert_into(schema::game_results::table)
            .values(&result)
            .returning(GameResultRow::as_returning())
            .get_result(&mut conn)?;

        info!(
            result_id = row.id(),
            session_id = %row.session_id(),
            won = row.won(),
            "Game result recorded"
        );
        Ok(row)
    }

    /// Lists the most recently played results, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn recent_results(&self, limit: i64) -> Result<Vec<GameResultRow>, DbError> {
        let mut conn = self.connection()?;

        let rows = schema::game_results::table
            .order(schema::game_results::played_at.desc())
            .limit(limit)
            .load::<GameResultRow>(&mut conn)?;

        debug!(count = rows.len(), "Results loaded");
        Ok(rows)
    }
}
