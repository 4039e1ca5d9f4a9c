//! The publisher (observable) at the centre of the pipeline.
//!
//! A [`Publisher`] holds the current content and an ordered list of weak
//! subscriber references. It never owns a subscriber: dropping the last
//! `Arc` to a subscriber is enough to stop its notifications, and the dead
//! entry is pruned the next time something is published.
//!
//! Publishing is synchronous. Subscribers receive `&Publisher`, so none of
//! them can publish or change the registry while a notification is running,
//! and every one of them observes the content that was just set.

use crate::config::PublisherConfig;
use crate::core::Subscriber;
use crate::error::{PublisherError, SubscriberError};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};
use tracing::{debug, instrument, warn};

/// A subscriber that failed while reacting to a publish.
#[derive(Debug)]
pub struct SubscriberFailure {
    pub subscriber: String,
    pub error: SubscriberError,
}

/// Outcome of a single [`Publisher::publish`] call.
#[derive(Debug, Default)]
pub struct PublishReport {
    /// Subscribers whose `update` returned `Ok`.
    pub notified: usize,
    /// Dead registrations removed before notifying.
    pub pruned: usize,
    pub failures: Vec<SubscriberFailure>,
}

impl PublishReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Holds the current content and notifies subscribers when it changes.
pub struct Publisher {
    current: Option<String>,
    subscribers: Vec<Weak<dyn Subscriber>>,
    dedupe_subscriptions: bool,
}

impl Publisher {
    pub fn new() -> Self {
        Self {
            current: None,
            subscribers: Vec::new(),
            dedupe_subscriptions: false,
        }
    }

    pub fn from_config(config: &PublisherConfig) -> Self {
        Self {
            dedupe_subscriptions: config.dedupe_subscriptions,
            ..Self::new()
        }
    }

    /// Registers `subscriber` without taking ownership of it.
    ///
    /// Subscribing the same instance twice yields two notifications per
    /// publish, unless subscription deduplication is enabled.
    pub fn subscribe<S: Subscriber + 'static>(&mut self, subscriber: &Arc<S>) {
        if self.dedupe_subscriptions && self.position(subscriber).is_some() {
            debug!(subscriber = subscriber.name(), "Ignoring duplicate subscription");
            return;
        }
        let weak = Arc::downgrade(subscriber);
        let weak: Weak<dyn Subscriber> = weak;
        self.subscribers.push(weak);
        debug!(subscriber = subscriber.name(), "Subscriber registered");
    }

    /// Removes every registration of `subscriber`. Returns how many were removed.
    pub fn unsubscribe<S: Subscriber + 'static>(&mut self, subscriber: &Arc<S>) -> usize {
        let target = Arc::as_ptr(subscriber) as *const ();
        let before = self.subscribers.len();
        self.subscribers
            .retain(|weak| weak.as_ptr() as *const () != target);
        let removed = before - self.subscribers.len();
        debug!(subscriber = subscriber.name(), removed, "Subscriber unregistered");
        removed
    }

    /// Number of registrations whose subscriber is still alive.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Returns the most recently published content.
    pub fn current_content(&self) -> Result<&str, PublisherError> {
        self.current.as_deref().ok_or(PublisherError::EmptyState)
    }

    /// Replaces the current content and notifies every live subscriber in
    /// registration order. A failing or panicking subscriber is recorded in
    /// the report and does not prevent later subscribers from running.
    #[instrument(skip_all, fields(subscribers = self.subscribers.len()))]
    pub fn publish(&mut self, content: impl Into<String>) -> PublishReport {
        self.current = Some(content.into());
        metrics::counter!("notifications_published_total").increment(1);

        let mut report = PublishReport::default();
        let before = self.subscribers.len();
        self.subscribers.retain(|weak| weak.strong_count() > 0);
        report.pruned = before - self.subscribers.len();
        if report.pruned > 0 {
            debug!(pruned = report.pruned, "Pruned dropped subscribers");
        }

        let live: Vec<Arc<dyn Subscriber>> =
            self.subscribers.iter().filter_map(Weak::upgrade).collect();
        let source: &Publisher = self;

        for subscriber in live {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| subscriber.update(source)))
                .unwrap_or_else(|payload| Err(SubscriberError::Panicked(panic_message(payload.as_ref()))));

            match outcome {
                Ok(()) => report.notified += 1,
                Err(error) => {
                    warn!(
                        subscriber = subscriber.name(),
                        kind = error.as_label(),
                        "Subscriber failed: {}",
                        error
                    );
                    metrics::counter!("subscriber_failures_total").increment(1);
                    report.failures.push(SubscriberFailure {
                        subscriber: subscriber.name().to_string(),
                        error,
                    });
                }
            }
        }

        report
    }

    fn position<S: Subscriber + 'static>(&self, subscriber: &Arc<S>) -> Option<usize> {
        let target = Arc::as_ptr(subscriber) as *const ();
        self.subscribers
            .iter()
            .position(|weak| weak.as_ptr() as *const () == target)
    }
}

impl Default for Publisher {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
