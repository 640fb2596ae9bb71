//! Runtime configuration.
//!
//! Values come from three layers, highest precedence first: CLI flags, the
//! optional YAML file (`--config`), then the built-in defaults below. The
//! merged [`Config`] is immutable and handed to the pipeline by reference.

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::models::Recipient;
use serde::Deserialize;
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};

pub const DEFAULT_URL: &str = "https://na.finalfantasyxiv.com/lodestone/news/category/1";
pub const DEFAULT_WORLD: &str = "tonberry";
pub const DEFAULT_BOT_API_TOKEN: &str = "TOKEN";
pub const DEFAULT_RECIPIENT_ID: &str = "USERID";
pub const DEFAULT_INTERVAL_SECS: u64 = 10 * 60;

/// Shape of the YAML config file. Every key is optional.
///
/// ```yaml
/// url: https://na.finalfantasyxiv.com/lodestone/news/category/1
/// world: tonberry
/// bot_api_token: "123:ABC"
/// recipient_id: "123456789"
/// marker_world: Tonberry
/// interval_secs: 600
/// keep_polling: false
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub url: Option<String>,
    pub world: Option<String>,
    pub bot_api_token: Option<String>,
    pub recipient_id: Option<String>,
    pub marker_world: Option<String>,
    pub interval_secs: Option<u64>,
    pub keep_polling: Option<bool>,
}

impl FileConfig {
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(format!("invalid YAML: {e}")))
    }

    #[instrument(level = "info", skip_all, fields(path = %path))]
    pub async fn load(path: &str) -> Result<Self> {
        let yaml = fs::read_to_string(path)
            .await
            .map_err(|e| Error::Config(format!("could not read {path}: {e}")))?;
        let file = Self::parse(&yaml)?;
        info!("Loaded configuration file");
        Ok(file)
    }
}

/// Fully resolved settings for one process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub world: String,
    pub bot_api_token: String,
    pub recipient: Recipient,
    /// `None` keeps the built-in marker world.
    pub marker_world: Option<String>,
    pub interval: Duration,
    pub keep_polling: bool,
}

impl Config {
    /// Merge CLI flags over `file` over the built-in defaults and validate.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let pick = |flag: &Option<String>, from_file: Option<String>, default: &str| {
            flag.clone()
                .or(from_file)
                .unwrap_or_else(|| default.to_string())
        };

        let url = pick(&cli.url, file.url, DEFAULT_URL);
        let world = pick(&cli.world, file.world, DEFAULT_WORLD);
        let bot_api_token = pick(&cli.bot_api_token, file.bot_api_token, DEFAULT_BOT_API_TOKEN);
        let recipient_id = pick(&cli.recipient_id, file.recipient_id, DEFAULT_RECIPIENT_ID);

        let recipient = Recipient::new(recipient_id)
            .ok_or_else(|| Error::Config("recipient id must not be empty".to_string()))?;

        let interval_secs = cli
            .interval_secs
            .or(file.interval_secs)
            .unwrap_or(DEFAULT_INTERVAL_SECS);
        if interval_secs == 0 {
            return Err(Error::Config("interval must be at least one second".to_string()));
        }

        Ok(Self {
            url,
            world,
            bot_api_token,
            recipient,
            marker_world: cli.marker_world.clone().or(file.marker_world),
            interval: Duration::from_secs(interval_secs),
            keep_polling: Self::pick_keep_polling(cli, file.keep_polling),
        })
    }

    /// `--keep-polling` / `--no-keep-polling` beat the file, which beats off.
    fn pick_keep_polling(cli: &Cli, from_file: Option<bool>) -> bool {
        if cli.keep_polling {
            true
        } else if cli.no_keep_polling {
            false
        } else {
            from_file.unwrap_or(false)
        }
    }

    /// Build the config for this process from parsed CLI arguments.
    pub async fn from_cli(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path).await?,
            None => FileConfig::default(),
        };
        Self::resolve(cli, file)
    }
}
