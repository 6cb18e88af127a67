//! Server configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::words::WordPolicy;

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Server configuration, loadable from a TOML file.
///
/// Every field has a default so a missing file or empty table still yields
/// a runnable demo server (builtin words, no persistence).
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind to.
    #[serde(default = "default_port")]
    port: u16,

    /// SQLite database path; `None` runs with builtin words and no stats.
    #[serde(default)]
    db_path: Option<String>,

    /// Whether completed games are recorded to the leaderboard table.
    #[serde(default = "default_leaderboard_enabled")]
    leaderboard_enabled: bool,

    /// Word selection policy for the database-backed source.
    #[serde(default)]
    word_policy: WordPolicy,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_leaderboard_enabled() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            db_path: None,
            leaderboard_enabled: default_leaderboard_enabled(),
            word_policy: WordPolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Overrides the bind host.
    pub fn set_host(&mut self, host: String) {
        self.host = host;
    }

    /// Overrides the bind port.
    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    /// Overrides the database path.
    pub fn set_db_path(&mut self, db_path: Option<String>) {
        self.db_path = db_path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(*config.port(), 3000);
        assert!(config.db_path().is_none());
        assert!(*config.leaderboard_enabled());
        assert_eq!(*config.word_policy(), WordPolicy::Daily);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: ServerConfig = toml::from_str(
            r#"
            port = 8080
            db_path = "define.db"
            word_policy = "random"
            "#,
        )
        .unwrap();
        assert_eq!(*config.port(), 8080);
        assert_eq!(config.db_path().as_deref(), Some("define.db"));
        assert_eq!(*config.word_policy(), WordPolicy::Random);
        // Unspecified fields fall back to defaults.
        assert_eq!(config.host(), "127.0.0.1");
        assert!(*config.leaderboard_enabled());
    }
}
