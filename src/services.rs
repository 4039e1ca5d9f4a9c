//! The notification service and pipeline setup.
//!
//! [`NotificationService`] is constructed explicitly and passed to whoever
//! needs it; there is no process-wide instance. It owns the [`Publisher`]
//! and a bounded history of what was sent.

use crate::{
    channels::ConsoleChannel,
    config::{Config, NotificationConfig, PublisherConfig},
    content::{Decoration, Notification},
    formatting::formatter_for,
    notification::{DispatchSubscriber, LoggingSubscriber},
    publisher::{PublishReport, Publisher},
    sink::Console,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A notification that has been published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

/// Renders notifications, remembers them, and publishes them.
pub struct NotificationService {
    publisher: Publisher,
    history: VecDeque<SentNotification>,
    history_limit: usize,
}

impl NotificationService {
    pub fn new(config: &PublisherConfig) -> Self {
        Self {
            publisher: Publisher::from_config(config),
            history: VecDeque::with_capacity(config.history_limit.min(1024)),
            history_limit: config.history_limit,
        }
    }

    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    /// Mutable access for subscribing and unsubscribing.
    pub fn publisher_mut(&mut self) -> &mut Publisher {
        &mut self.publisher
    }

    /// Sent notifications, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &SentNotification> {
        self.history.iter()
    }

    /// Renders `notification` once, records it, and publishes it.
    #[instrument(skip_all)]
    pub fn send(&mut self, notification: &Notification) -> PublishReport {
        let content = notification.render();
        self.record(&content);
        self.publisher.publish(content)
    }

    fn record(&mut self, content: &str) {
        if self.history_limit == 0 {
            return;
        }
        if self.history.len() == self.history_limit {
            self.history.pop_front();
            debug!("History full, dropped oldest notification");
        }
        self.history.push_back(SentNotification {
            content: content.to_string(),
            sent_at: Utc::now(),
        });
    }
}

impl From<&NotificationConfig> for Notification {
    fn from(config: &NotificationConfig) -> Self {
        let mut notification = Notification::new(config.message.clone());
        if config.timestamp {
            notification = notification.decorate(Decoration::Timestamp);
        }
        if let Some(signature) = config.signature.as_deref().map(str::trim) {
            if !signature.is_empty() {
                notification = notification.decorate(Decoration::Signature(signature.to_string()));
            }
        }
        notification
    }
}

/// A wired service together with the subscribers it notifies.
///
/// The publisher only holds weak references, so the pipeline keeps the
/// subscribers alive for as long as it exists.
pub struct Pipeline {
    pub service: NotificationService,
    pub logger: Arc<LoggingSubscriber>,
    pub dispatcher: Arc<DispatchSubscriber>,
}

/// Builds a service with the logger and a dispatcher carrying every
/// configured channel, all writing to `console`.
pub fn setup_notification_pipeline(config: &Config, console: Console) -> Result<Pipeline> {
    let mut service = NotificationService::new(&config.publisher);

    let logger = Arc::new(LoggingSubscriber::new(
        console.clone(),
        formatter_for(&config.output.format),
    ));
    let dispatcher = Arc::new(DispatchSubscriber::new());
    for kind in &config.channels {
        dispatcher.add_channel(Arc::new(ConsoleChannel::new(
            kind.clone(),
            console.clone(),
            formatter_for(&config.output.format),
        )));
    }
    if config.channels.is_empty() {
        warn!("No delivery channels configured; notifications will only be logged.");
    }

    service.publisher_mut().subscribe(&logger);
    service.publisher_mut().subscribe(&dispatcher);
    info!(
        channels = dispatcher.channel_count(),
        "Notification pipeline ready."
    );

    Ok(Pipeline {
        service,
        logger,
        dispatcher,
    })
}
