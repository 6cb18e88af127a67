//! Command-line interface for the DEFINE game server.

use clap::{Parser, Subcommand};

/// DEFINE - word-guessing game server
#[derive(Parser, Debug)]
#[command(name = "define_server")]
#[command(about = "Game server for the DEFINE word-guessing game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(long)]
        config: Option<std::path::PathBuf>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database path (overrides config); omit to serve builtin
        /// demo words without persistence
        #[arg(long)]
        db_path: Option<String>,
    },
}
