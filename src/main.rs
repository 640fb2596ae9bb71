//! # Lodestone Watch
//!
//! Polls the Lodestone news listing for the world-congestion notice and
//! sends a Telegram message once the watched world is no longer listed as
//! congested.
//!
//! ## Usage
//!
//! ```sh
//! lodestone_watch --world tonberry --bot-api-token 123:ABC --recipient-id 123456789
//! ```
//!
//! ## Architecture
//!
//! Each check is one pipeline pass:
//! 1. **Scanning**: fetch the listing and find the first "congested" entry
//! 2. **Resolving**: join its link onto the listing's scheme and host
//! 3. **Inspecting**: fetch the article and look for the `× World` marker
//! 4. **Notifying**: message the recipient if the marker is gone
//!
//! The first check runs at startup; the rest run on a fixed interval.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod notify;
mod pipeline;
mod poller;
mod scrapers;
mod utils;

use cli::Cli;
use config::Config;
use fetch::HttpFetcher;
use notify::TelegramNotifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("lodestone_watch starting up");

    let args = Cli::parse();
    debug!(?args.url, ?args.world, ?args.config, "Parsed CLI arguments");

    let config = Config::from_cli(&args).await.inspect_err(|e| {
        error!(error = %e, "Could not load configuration");
    })?;
    info!(
        url = %config.url,
        world = %config.world,
        recipient = %config.recipient,
        interval_secs = config.interval.as_secs(),
        keep_polling = config.keep_polling,
        "Configuration resolved"
    );

    let fetcher = HttpFetcher::new()?;
    let notifier = TelegramNotifier::new(config.bot_api_token.clone());

    if let Err(e) = poller::run_forever(&config, &fetcher, &notifier).await {
        error!(error = %e, "Watch stopped");
        return Err(e.into());
    }

    Ok(())
}
