//! Vibe Commerce terminal storefront.
//!
//! # Usage
//!
//! ```bash
//! # Against a local API on port 5000
//! vibe-shop
//!
//! # Against another host
//! vibe-shop --api-url http://shop.internal:5000/api
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, default `warn`) so they never interleave
//! with the screens written to stdout.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use vibe_commerce_storefront::commands::Command;
use vibe_commerce_storefront::config::StorefrontArgs;
use vibe_commerce_storefront::shell::{self, Outcome};
use vibe_commerce_storefront::{ApiClient, Storefront, render};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = StorefrontArgs::parse();

    if let Err(e) = run(args).await {
        tracing::error!("Storefront failed: {e}");
        std::process::exit(1);
    }
}

async fn run(args: StorefrontArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client = ApiClient::new(&args.api_url)?;
    tracing::info!(api_url = %client.base_url(), "Starting storefront");

    let mut store = Storefront::new(client);
    let mut stdout = tokio::io::stdout();

    write_screen(&mut stdout, &render::page(&store)?).await?;
    store.load_products().await;
    write_screen(&mut stdout, &render::page(&store)?).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                write_screen(&mut stdout, &e.to_string()).await?;
                continue;
            }
        };

        match shell::apply(&mut store, command).await? {
            Outcome::Continue(screen) => write_screen(&mut stdout, &screen).await?,
            Outcome::Quit => break,
        }
    }

    Ok(())
}

async fn write_screen(stdout: &mut tokio::io::Stdout, screen: &str) -> std::io::Result<()> {
    stdout.write_all(screen.trim_end().as_bytes()).await?;
    stdout.write_all(b"\n\n> ").await?;
    stdout.flush().await
}
