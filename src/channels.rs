//! Delivery channels.
//!
//! [`ChannelKind`] is the closed set of built-in channels. A [`ConsoleChannel`]
//! pairs one kind with a console sink and a formatter, and implements the
//! [`Channel`] trait the dispatcher works against.

use crate::core::Channel;
use crate::error::ChannelError;
use crate::formatting::{Envelope, TextFormatter};
use crate::sink::Console;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The built-in delivery channels, each with its static target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChannelKind {
    Email { address: String },
    Sms { number: String },
    Popup,
}

impl ChannelKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChannelKind::Email { .. } => "email",
            ChannelKind::Sms { .. } => "sms",
            ChannelKind::Popup => "popup",
        }
    }

    /// The bracketed tag shown in console output.
    pub fn tag(&self) -> &'static str {
        match self {
            ChannelKind::Email { .. } => "Email",
            ChannelKind::Sms { .. } => "SMS",
            ChannelKind::Popup => "Popup",
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            ChannelKind::Email { address } => Some(address.as_str()),
            ChannelKind::Sms { number } => Some(number.as_str()),
            ChannelKind::Popup => None,
        }
    }

    pub fn headline(&self) -> String {
        match self.target() {
            Some(target) => format!("Sent to {}", target),
            None => "Notification displayed".to_string(),
        }
    }
}

/// A channel that renders to a console sink.
pub struct ConsoleChannel {
    kind: ChannelKind,
    console: Console,
    formatter: Box<dyn TextFormatter>,
}

impl ConsoleChannel {
    pub fn new(kind: ChannelKind, console: Console, formatter: Box<dyn TextFormatter>) -> Self {
        Self {
            kind,
            console,
            formatter,
        }
    }

    pub fn kind(&self) -> &ChannelKind {
        &self.kind
    }
}

impl Channel for ConsoleChannel {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn target(&self) -> Option<&str> {
        self.kind.target()
    }

    #[instrument(skip(self, content), fields(channel = self.kind.name()))]
    fn deliver(&self, content: &str) -> Result<(), ChannelError> {
        let envelope = Envelope {
            tag: self.kind.tag(),
            headline: self.kind.headline(),
            content,
        };
        self.console
            .write_block(&self.formatter.format(&envelope))
            .map_err(|e| ChannelError::Unavailable {
                channel: self.kind.name().to_string(),
                reason: e.to_string(),
            })?;
        debug!("Delivered notification");
        Ok(())
    }
}
