//! Recall CLI entry point.
//!
//! Binary name: `recall`
//!
//! Parses CLI arguments, initializes configuration, database, and services,
//! then runs the interactive chat loop.

mod cli;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info,sqlx=warn",
        1 => "debug,sqlx=warn",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let state = AppState::init().await?;

    cli::chat::run_chat_loop(&state, &cli.thread).await
}
