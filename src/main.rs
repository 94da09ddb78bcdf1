use clap::{Parser, Subcommand};
use database::DbRepository;
use service::{GuestBook, GuestBookService};
use std::sync::Arc;

/// The main entry point for the guest book service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration (.env, optional config.toml, environment)
    let mut settings = configuration::load_settings()?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let _guard = configuration::init_tracing(&settings.logging);

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            tracing::info!(port = settings.server.port, "Starting guest book service");
            web_server::run_server(&settings).await?;
        }
        Commands::InitDb => handle_init_db(&settings).await?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A small guest book REST service backed by PostgreSQL.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (the default when no command is given).
    Serve {
        /// Overrides the PORT setting.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Create the table and index if they are missing, then exit.
    InitDb,
}

// ==============================================================================
// Init-DB Command Logic
// ==============================================================================

async fn handle_init_db(settings: &configuration::Settings) -> anyhow::Result<()> {
    let pool = database::connect(&settings.database).await?;
    let guestbook = GuestBookService::new(
        Arc::new(DbRepository::new(pool.clone())),
        settings.server.request_timeout,
    );

    let result = guestbook.initialize_schema().await;
    pool.close().await;
    result?;

    tracing::info!("Schema is up to date");
    Ok(())
}
