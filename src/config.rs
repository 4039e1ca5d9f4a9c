//! Configuration management for Herald
//!
//! This module defines the main `Config` struct and its sub-structs,
//! responsible for holding all application settings. It uses the `figment`
//! crate to load configuration from a `herald.toml` file and merge it
//! with environment variables and command-line arguments.

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::channels::ChannelKind;
use crate::cli::Cli;

/// The file read when no `--config` path is given. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "herald.toml";

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Configuration for console output.
    pub output: OutputConfig,
    /// Configuration for the publisher and its history.
    pub publisher: PublisherConfig,
    /// The notification sent when the program runs.
    pub notification: NotificationConfig,
    /// Delivery channels attached to the dispatcher, in order.
    pub channels: Vec<ChannelKind>,
}

/// The format for console output.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    PlainText,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "Json"),
            OutputFormat::PlainText => write!(f, "PlainText"),
        }
    }
}

/// Configuration for console output.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// The format used by the logger and the console channels.
    pub format: OutputFormat,
}

/// Configuration for the publisher.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PublisherConfig {
    /// Ignore a second subscription of the same subscriber.
    pub dedupe_subscriptions: bool,
    /// How many sent notifications to remember. 0 disables history.
    pub history_limit: usize,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            dedupe_subscriptions: false,
            history_limit: 100,
        }
    }
}

/// The notification to send.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NotificationConfig {
    /// The base message.
    pub message: String,
    /// Appended as a `-- <signature>` line when set.
    pub signature: Option<String>,
    /// Prefix the message with the current time.
    pub timestamp: bool,
}

impl Config {
    /// Loads the application configuration.
    ///
    /// Sources are layered, later ones winning: built-in defaults, the TOML
    /// file (`--config` or `herald.toml`), `HERALD_` environment variables
    /// (`__` separates nested keys), then command-line arguments.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            // e.g. HERALD_OUTPUT__FORMAT=Json
            .merge(Env::prefixed("HERALD_").split("__"))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}

// Provide a default implementation for tests and easy setup.
impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            output: OutputConfig {
                format: OutputFormat::PlainText,
            },
            publisher: PublisherConfig::default(),
            notification: NotificationConfig {
                message: "Your internship confirmation has been approved!".to_string(),
                signature: Some("Microsoft Dublin HR Team".to_string()),
                timestamp: true,
            },
            channels: vec![
                ChannelKind::Email {
                    address: "abc@outlook.com".to_string(),
                },
                ChannelKind::Sms {
                    number: "+353 8743210".to_string(),
                },
                ChannelKind::Popup,
            ],
        }
    }
}
