//! The dispatch subscriber fans published content out to delivery channels.

use crate::core::{Channel, Subscriber};
use crate::error::{ChannelError, SubscriberError};
use crate::publisher::Publisher;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{error, info, instrument};

/// What happened the last time the dispatcher fanned content out.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Names of the channels that delivered, in order.
    pub delivered: Vec<String>,
    /// Channel failures, in order. These never reach the publisher.
    pub failed: Vec<ChannelError>,
}

/// A subscriber that forwards every publish to its channels, in order.
pub struct DispatchSubscriber {
    channels: RwLock<Vec<Arc<dyn Channel>>>,
    last_report: Mutex<Option<DispatchReport>>,
}

impl DispatchSubscriber {
    pub fn new() -> Self {
        Self {
            channels: RwLock::new(Vec::new()),
            last_report: Mutex::new(None),
        }
    }

    /// Appends `channel`; it is used from the next notification on.
    pub fn add_channel(&self, channel: Arc<dyn Channel>) {
        info!(channel = channel.name(), "Channel added to dispatcher");
        self.channels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(channel);
    }

    pub fn channel_count(&self) -> usize {
        self.channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Takes the report from the most recent notification, if any.
    pub fn take_last_report(&self) -> Option<DispatchReport> {
        self.last_report
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn dispatch(&self, content: &str) -> DispatchReport {
        let channels = self
            .channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let mut report = DispatchReport::default();

        for channel in channels {
            match channel.deliver(content) {
                Ok(()) => {
                    metrics::counter!("channel_deliveries_total", "channel" => channel.name().to_string())
                        .increment(1);
                    report.delivered.push(channel.name().to_string());
                }
                Err(e) => {
                    error!(
                        channel = channel.name(),
                        target = channel.target().unwrap_or("-"),
                        "Failed to deliver notification: {}",
                        e
                    );
                    metrics::counter!("channel_failures_total", "channel" => channel.name().to_string())
                        .increment(1);
                    report.failed.push(e);
                }
            }
        }

        report
    }
}

impl Default for DispatchSubscriber {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscriber for DispatchSubscriber {
    fn name(&self) -> &str {
        "dispatch"
    }

    #[instrument(skip_all)]
    fn update(&self, source: &Publisher) -> Result<(), SubscriberError> {
        let content = source.current_content()?;
        let report = self.dispatch(content);
        info!(
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            "Dispatched notification"
        );
        *self
            .last_report
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(report);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_test::traced_test;

    // A fake channel that counts calls and can be told to fail.
    struct FakeChannel {
        name: String,
        calls: AtomicUsize,
        received: Mutex<Vec<String>>,
        fail: bool,
    }

    impl FakeChannel {
        fn new(name: &str, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                calls: AtomicUsize::new(0),
                received: Mutex::new(Vec::new()),
                fail,
            })
        }
    }

    impl Channel for FakeChannel {
        fn name(&self) -> &str {
            &self.name
        }

        fn target(&self) -> Option<&str> {
            None
        }

        fn deliver(&self, content: &str) -> Result<(), ChannelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ChannelError::Unavailable {
                    channel: self.name.clone(),
                    reason: "simulated outage".to_string(),
                });
            }
            self.received.lock().unwrap().push(content.to_string());
            Ok(())
        }
    }

    #[test]
    #[traced_test]
    fn test_failing_channel_does_not_short_circuit() {
        let a = FakeChannel::new("a", false);
        let b = FakeChannel::new("b", true);
        let c = FakeChannel::new("c", false);
        let dispatcher = Arc::new(DispatchSubscriber::new());
        dispatcher.add_channel(a.clone());
        dispatcher.add_channel(b.clone());
        dispatcher.add_channel(c.clone());

        let mut publisher = Publisher::new();
        publisher.subscribe(&dispatcher);
        let publish = publisher.publish("payload");

        assert!(publish.is_clean(), "channel failures must not reach the publisher");
        assert_eq!(a.calls.load(Ordering::SeqCst), 1);
        assert_eq!(b.calls.load(Ordering::SeqCst), 1);
        assert_eq!(c.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*c.received.lock().unwrap(), vec!["payload".to_string()]);

        let report = dispatcher.take_last_report().unwrap();
        assert_eq!(report.delivered, vec!["a".to_string(), "c".to_string()]);
        assert_eq!(report.failed.len(), 1);
        assert!(logs_contain("Failed to deliver notification"));
    }

    #[test]
    fn test_channels_added_after_subscribe_are_used() {
        let dispatcher = Arc::new(DispatchSubscriber::new());
        let mut publisher = Publisher::new();
        publisher.subscribe(&dispatcher);

        publisher.publish("first");
        assert!(dispatcher.take_last_report().unwrap().delivered.is_empty());

        let late = FakeChannel::new("late", false);
        dispatcher.add_channel(late.clone());
        publisher.publish("second");

        assert_eq!(dispatcher.channel_count(), 1);
        assert_eq!(*late.received.lock().unwrap(), vec!["second".to_string()]);
    }

    #[test]
    fn test_update_without_content_fails() {
        let dispatcher = DispatchSubscriber::new();
        let publisher = Publisher::new();
        let err = dispatcher.update(&publisher).unwrap_err();
        assert!(matches!(err, SubscriberError::Content(_)));
    }
}
