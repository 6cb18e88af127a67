//! Database persistence layer for words and game results.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{DailyWordRow, GameResultRow, NewGameResult, NewWordRow, WordRow};
pub use repository::GameRepository;
