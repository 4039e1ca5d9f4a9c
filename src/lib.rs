//! Herald - a decorated notification pipeline
//!
//! This library builds notification content from decorations, publishes it
//! through an observable, and fans it out to delivery channels.

pub mod app;
pub mod channels;
pub mod cli;
pub mod config;
pub mod content;
pub mod core;
pub mod error;
pub mod formatting;
pub mod notification;
pub mod publisher;
pub mod services;
pub mod sink;

// Re-export core types for convenience
pub use crate::core::{Channel, Subscriber};
pub use content::{build, Decoration, Notification};
pub use error::{ChannelError, PublisherError, SubscriberError};
pub use publisher::{PublishReport, Publisher};
