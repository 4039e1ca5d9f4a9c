//! Subscribers that react to published notifications.
//!
//! The publisher notifies every subscriber without knowing what it does.
//! [`logging_subscriber`] records the notification; [`dispatch`] forwards it
//! to the configured delivery channels.
pub mod dispatch;
pub mod logging_subscriber;

pub use dispatch::{DispatchReport, DispatchSubscriber};
pub use logging_subscriber::LoggingSubscriber;
