//! Error types for the notification pipeline.
//!
//! - [`PublisherError`]: raised when reading publisher state.
//! - [`ChannelError`]: raised by a delivery channel; recovered by the dispatcher.
//! - [`SubscriberError`]: raised by a subscriber during notification; isolated
//!   by the publisher and reported back in the publish report.

use thiserror::Error;

/// Errors produced by the [`Publisher`](crate::publisher::Publisher).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublisherError {
    /// Content was requested before anything was published.
    #[error("no notification has been published yet")]
    EmptyState,
}

/// Errors produced while delivering content through a channel.
#[derive(Error, Debug)]
pub enum ChannelError {
    /// The channel's sink could not accept the content.
    #[error("channel '{channel}' unavailable: {reason}")]
    Unavailable {
        /// Name of the channel that failed.
        channel: String,
        /// Human-readable reason.
        reason: String,
    },
}

impl ChannelError {
    /// Returns a short stable label for logs and metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ChannelError::Unavailable { .. } => "channel_unavailable",
        }
    }
}

/// Errors produced by a subscriber reacting to a publish.
#[derive(Error, Debug)]
pub enum SubscriberError {
    #[error("failed to read current content: {0}")]
    Content(#[from] PublisherError),

    #[error("subscriber I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The subscriber panicked; the payload message is kept when it is a string.
    #[error("subscriber panicked: {0}")]
    Panicked(String),
}

impl SubscriberError {
    /// Returns a short stable label for logs and metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SubscriberError::Content(_) => "subscriber_content",
            SubscriberError::Io(_) => "subscriber_io",
            SubscriberError::Panicked(_) => "subscriber_panicked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PublisherError::EmptyState.to_string(),
            "no notification has been published yet"
        );
        let err = ChannelError::Unavailable {
            channel: "sms".to_string(),
            reason: "gateway down".to_string(),
        };
        assert_eq!(err.to_string(), "channel 'sms' unavailable: gateway down");
        assert_eq!(err.as_label(), "channel_unavailable");
    }

    #[test]
    fn test_publisher_error_converts_into_subscriber_error() {
        let err: SubscriberError = PublisherError::EmptyState.into();
        assert!(matches!(err, SubscriberError::Content(PublisherError::EmptyState)));
        assert_eq!(err.as_label(), "subscriber_content");
    }
}
