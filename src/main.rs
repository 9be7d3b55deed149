use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{load_settings, Settings, StoreBackend};
use std::path::PathBuf;

/// The main entry point for the safeguarding concerns service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            args.apply(&mut settings);
            settings.validate()?;
            let _log_guard = configuration::init_tracing(&settings.logging)?;
            web_server::run_server(settings).await
        }
        Commands::Migrate => {
            let _log_guard = configuration::init_tracing(&settings.logging)?;
            handle_migrate(&settings).await
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Records and serves safeguarding concerns raised about students.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML settings file (defaults to ./config.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Apply the PostgreSQL migrations and exit.
    Migrate,
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to bind (overrides `server.host`).
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides `server.port`).
    #[arg(long)]
    port: Option<u16>,

    /// Which store backs the API (overrides `store.backend`).
    #[arg(long, value_enum)]
    store: Option<StoreBackend>,
}

impl ServeArgs {
    /// Command-line flags win over file and environment settings.
    fn apply(self, settings: &mut Settings) {
        if let Some(host) = self.host {
            settings.server.host = host;
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(store) = self.store {
            settings.store.backend = store;
        }
    }
}

// ==============================================================================
// Migrate Command Logic
// ==============================================================================

async fn handle_migrate(settings: &Settings) -> anyhow::Result<()> {
    let db = &settings.database;
    let url = db
        .url
        .as_deref()
        .context("database.url (or DATABASE_URL) must be set to run migrations")?;

    let pool = database::connect(url, db.max_connections, db.acquire_timeout()).await?;
    database::run_migrations(&pool).await?;
    tracing::info!("Migrations complete.");
    Ok(())
}
