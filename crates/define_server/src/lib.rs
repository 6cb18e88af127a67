//! DEFINE game server library.
//!
//! Wires the pure [`define_engine`] state machine to its collaborators
//! behind swappable adapters:
//!
//! - **Session store**: keyed session snapshots (in-memory bundled)
//! - **Word source**: daily/random words from SQLite, or a builtin list
//! - **Stats sink**: completed games into a leaderboard table, or discarded
//!
//! plus the orchestration service, a REST API, and the CLI around them.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod db;
mod http;
mod service;
mod sink;
mod store;
mod words;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Database layer
pub use db::{DbError, GameRepository, GameResultRow, NewGameResult};

// Crate-level exports - REST API
pub use http::{ApiError, CreateGameRequest, GuessRequest, router};

// Crate-level exports - Orchestration
pub use service::{GameService, GuessView, RevealedClue, ServiceError, SessionView};

// Crate-level exports - Stats sink
pub use sink::{CompletedGame, DbStatsSink, NullStatsSink, SinkError, StatsSink};

// Crate-level exports - Session store
pub use store::{MemorySessionStore, SessionStore, StoreError};

// Crate-level exports - Word sourcing
pub use words::{BuiltinWordSource, DbWordSource, WordPolicy, WordSource, WordSourceError};
