//! Artisan Market CLI - browse the catalog from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List every artisan
//! artisan-cli artisans
//!
//! # List one category
//! artisan-cli artisans --category pottery
//!
//! # List every product with its artisan
//! artisan-cli products
//!
//! # Debounced suggestions; each stdin line is the current search box text
//! artisan-cli suggest
//! ```
//!
//! The profile API base URL comes from `--api-url` or `PROFILE_API_URL`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::Duration;

use artisan_market_storefront::catalog::Catalog;
use artisan_market_storefront::config::{ProfileApiConfig, parse_base_url};
use artisan_market_storefront::profiles::ProfileClient;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "artisan-cli")]
#[command(author, version, about = "Artisan Market CLI tools")]
struct Cli {
    /// Base URL of the artisan profile API
    #[arg(long, env = "PROFILE_API_URL", global = true)]
    api_url: Option<String>,

    /// Leave the demo artisans out of the catalog
    #[arg(long, global = true)]
    no_demo: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List artisans, optionally narrowed to a category
    Artisans {
        /// Category key or craft keyword (e.g. pottery, textiles)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List every product with its artisan
    Products,
    /// Run the debounced suggestion box over stdin lines
    ///
    /// Each line replaces the search text. `/select N` picks suggestion N,
    /// `/blur` and `/focus` simulate focus changes.
    Suggest,
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so listings stay pipeable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = build_catalog(cli.api_url.as_deref(), !cli.no_demo)?;

    match cli.command {
        Commands::Artisans { category } => {
            commands::catalog::artisans(&catalog, category.as_deref()).await?;
        }
        Commands::Products => commands::catalog::products(&catalog).await?,
        Commands::Suggest => commands::suggest::run(catalog).await?,
    }
    Ok(())
}

fn build_catalog(api_url: Option<&str>, include_demo: bool) -> Result<Catalog, Box<dyn std::error::Error>> {
    let raw = api_url.ok_or("PROFILE_API_URL not set (or pass --api-url)")?;
    let base_url = parse_base_url(raw).map_err(|e| format!("invalid profile API URL: {e}"))?;

    let client = ProfileClient::new(&ProfileApiConfig {
        base_url,
        cache_ttl: Duration::from_secs(300),
    });
    Ok(Catalog::new(client, include_demo))
}
