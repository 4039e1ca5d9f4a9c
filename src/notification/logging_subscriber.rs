//! A simple subscriber that logs every published notification.
//!
//! It writes a `[Logger]` block to its console sink and emits a tracing
//! event. A sink failure is logged and swallowed so it can never fail a
//! publish.

use crate::core::Subscriber;
use crate::error::SubscriberError;
use crate::formatting::{Envelope, TextFormatter};
use crate::publisher::Publisher;
use crate::sink::Console;
use tracing::{info, instrument, warn};

pub struct LoggingSubscriber {
    console: Console,
    formatter: Box<dyn TextFormatter>,
}

impl LoggingSubscriber {
    pub fn new(console: Console, formatter: Box<dyn TextFormatter>) -> Self {
        Self { console, formatter }
    }
}

impl Subscriber for LoggingSubscriber {
    fn name(&self) -> &str {
        "logger"
    }

    #[instrument(skip_all)]
    fn update(&self, source: &Publisher) -> Result<(), SubscriberError> {
        let content = source.current_content()?;
        info!(content, "New notification logged");

        let envelope = Envelope {
            tag: "Logger",
            headline: "New Notification Logged".to_string(),
            content,
        };
        if let Err(e) = self.console.write_block(&self.formatter.format(&envelope)) {
            warn!("LoggingSubscriber could not write to its sink: {}", e);
        }
        Ok(())
    }
}
