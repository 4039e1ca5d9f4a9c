//! Core service traits for Herald
//!
//! This module defines the trait contracts that govern how the publisher,
//! its subscribers and the delivery channels interact.

use crate::error::{ChannelError, SubscriberError};
use crate::publisher::Publisher;

/// Reacts to a publish event.
///
/// Subscribers hold no content of their own. On every notification they read
/// the latest value from the publisher that is notifying them.
pub trait Subscriber: Send + Sync {
    /// A unique, descriptive name for the subscriber (e.g., "logger", "dispatch").
    /// Used for logging and metrics.
    fn name(&self) -> &str;

    /// Called by the publisher after new content has been published.
    ///
    /// # Arguments
    /// * `source` - The publisher that is notifying; read content from it.
    ///
    /// # Returns
    /// * `Ok(())` if the subscriber handled the notification
    /// * `Err` if it could not; the publisher records the failure and moves on
    fn update(&self, source: &Publisher) -> Result<(), SubscriberError>;
}

/// Delivers content to a single external-looking sink.
pub trait Channel: Send + Sync {
    /// A unique, descriptive name for the channel (e.g., "email", "sms").
    fn name(&self) -> &str;

    /// The static target this channel delivers to (address, number, ...).
    fn target(&self) -> Option<&str>;

    /// Sends content through the channel.
    ///
    /// # Returns
    /// * `Ok(())` if the content was delivered
    /// * `Err` if the sink was unavailable
    fn deliver(&self, content: &str) -> Result<(), ChannelError>;
}
