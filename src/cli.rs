//! Command-line interface definitions for Lodestone Watch.
//!
//! Every value flag is optional so that [`crate::config::Config::resolve`]
//! can tell an explicit flag apart from a value supplied by the YAML file.
//! Built-in defaults live in [`crate::config`].

use clap::Parser;

/// Command-line arguments for the Lodestone Watch application.
///
/// # Examples
///
/// ```sh
/// # Watch Tonberry and message chat 123456789
/// lodestone_watch --bot-api-token 123:ABC --recipient-id 123456789
///
/// # Read everything from a file, override the world
/// lodestone_watch -c watch.yaml --world kujata --marker-world Kujata
/// ```
#[derive(Parser, Debug, Default)]
#[command(author, version, about)]
pub struct Cli {
    /// News listing page to scan [default: https://na.finalfantasyxiv.com/lodestone/news/category/1]
    #[arg(long)]
    pub url: Option<String>,

    /// World named in the notification message [default: tonberry]
    #[arg(long)]
    pub world: Option<String>,

    /// Telegram bot API token [default: TOKEN]
    #[arg(long)]
    pub bot_api_token: Option<String>,

    /// Chat id or @channel that receives the message [default: USERID]
    #[arg(long)]
    pub recipient_id: Option<String>,

    /// World looked up as "× World" in the article [default: Tonberry]
    #[arg(long)]
    pub marker_world: Option<String>,

    /// Seconds between checks [default: 600]
    #[arg(long)]
    pub interval_secs: Option<u64>,

    /// Log failed checks and keep polling instead of exiting
    #[arg(long, overrides_with = "no_keep_polling")]
    pub keep_polling: bool,

    /// Exit on a failed scheduled check, even if the config file enables keep_polling
    #[arg(long, overrides_with = "keep_polling")]
    pub no_keep_polling: bool,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,
}
