//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using the
//! `clap` crate. These arguments are parsed at startup and then merged with
//! the configuration from the `herald.toml` file and environment variables.

use clap::Parser;
use figment::{
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Decorates a notification and fans it out to the configured channels.
#[derive(Parser, Debug, Default, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The message to send.
    #[arg(short, long, value_name = "TEXT")]
    pub message: Option<String>,

    /// Signature appended to the message.
    #[arg(short, long, value_name = "TEXT")]
    pub signature: Option<String>,

    /// Do not prefix the message with a timestamp.
    #[arg(long)]
    pub no_timestamp: bool,

    /// Do not append a signature, even if one is configured.
    #[arg(long, conflicts_with = "signature")]
    pub no_signature: bool,

    /// Print console output as JSON lines.
    #[arg(long)]
    pub json: bool,

    /// Logging level (e.g. "debug", "info", "warn").
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        let mut notification = Dict::new();
        if let Some(message) = &self.message {
            notification.insert("message".into(), Value::from(message.clone()));
        }
        if let Some(signature) = &self.signature {
            notification.insert("signature".into(), Value::from(signature.clone()));
        }
        // Flags only override when present; an absent flag leaves the file value alone.
        if self.no_timestamp {
            notification.insert("timestamp".into(), Value::from(false));
        }
        // A blank signature means "no signature"; TOML has no null to unset the default.
        if self.no_signature {
            notification.insert("signature".into(), Value::from(""));
        }
        if !notification.is_empty() {
            dict.insert("notification".into(), Value::from(notification));
        }

        if self.json {
            let mut output = Dict::new();
            output.insert("format".into(), Value::from("Json"));
            dict.insert("output".into(), Value::from(output));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
