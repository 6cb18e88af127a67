//! DEFINE game server binary.

use anyhow::Result;
use clap::Parser;
use define_server::{
    BuiltinWordSource, Cli, Command, DbStatsSink, DbWordSource, GameRepository, GameService,
    MemorySessionStore, NullStatsSink, ServerConfig, SessionStore, StatsSink, WordSource, router,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            db_path,
        } => run_server(config, host, port, db_path).await,
    }
}

/// Run the HTTP game server
async fn run_server(
    config_path: Option<std::path::PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    db_path: Option<String>,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = match config_path {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(host) = host {
        config.set_host(host);
    }
    if let Some(port) = port {
        config.set_port(port);
    }
    if let Some(db_path) = db_path {
        config.set_db_path(Some(db_path));
    }

    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());

    let (words, sink): (Arc<dyn WordSource>, Arc<dyn StatsSink>) = match config.db_path() {
        Some(db_path) => {
            info!(db_path = %db_path, "Using SQLite word pool");
            let repository = GameRepository::new(db_path.clone())?;
            repository.run_migrations()?;

            let words = Arc::new(DbWordSource::new(repository.clone(), *config.word_policy()));
            let sink: Arc<dyn StatsSink> = if *config.leaderboard_enabled() {
                Arc::new(DbStatsSink::new(repository))
            } else {
                info!("Leaderboard recording disabled");
                Arc::new(NullStatsSink)
            };
            (words, sink)
        }
        None => {
            info!("No database configured, serving builtin demo words");
            (Arc::new(BuiltinWordSource::new()), Arc::new(NullStatsSink))
        }
    };

    let service = Arc::new(GameService::new(store, words, sink));
    let app = router(service);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(
        "Server ready at http://{}:{}/",
        config.host(),
        config.port()
    );

    axum::serve(listener, app).await?;

    Ok(())
}
