//! Vibe Commerce CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! vibe-cli migrate
//!
//! # Fill an empty catalog with the demo products
//! vibe-cli seed
//!
//! # Dump the catalog or the order history as JSON
//! vibe-cli products
//! vibe-cli orders
//! ```
//!
//! All commands read `VIBE_DATABASE_URL` (or `DATABASE_URL`), loading a
//! `.env` file first when present.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vibe-cli")]
#[command(author, version, about = "Vibe Commerce CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the demo catalog if no products exist
    Seed,
    /// Print all products as JSON
    Products,
    /// Print all orders as JSON, newest first
    Orders,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed => commands::seed::catalog().await,
        Commands::Products => commands::inspect::products().await,
        Commands::Orders => commands::inspect::orders().await,
    }
}
