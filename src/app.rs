//! The main application logic, decoupled from the entry point.

use crate::{
    config::Config,
    content::Notification,
    publisher::PublishReport,
    services::{setup_notification_pipeline, Pipeline},
    sink::Console,
};
use anyhow::Result;
use tracing::{info, instrument, warn};

/// A fully wired application, ready to send its configured notification.
pub struct App {
    config: Config,
    pipeline: Pipeline,
}

impl App {
    /// Creates a new `AppBuilder` to construct an `App`.
    pub fn builder(config: Config) -> AppBuilder {
        AppBuilder::new(config)
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Sends the configured notification through the pipeline.
    #[instrument(skip_all)]
    pub fn run(&mut self) -> Result<PublishReport> {
        let notification = Notification::from(&self.config.notification);
        let report = self.pipeline.service.send(&notification);

        for failure in &report.failures {
            warn!(
                subscriber = %failure.subscriber,
                "Subscriber failed during publish: {}",
                failure.error
            );
        }
        if let Some(dispatch) = self.pipeline.dispatcher.take_last_report() {
            info!(
                delivered = dispatch.delivered.len(),
                failed = dispatch.failed.len(),
                "Notification sent."
            );
        }
        Ok(report)
    }
}

/// Builder for the main application.
///
/// Keeps construction separate from running, and lets tests swap the
/// console for an in-memory buffer.
pub struct AppBuilder {
    config: Config,
    console_override: Option<Console>,
}

impl AppBuilder {
    /// Creates a new `AppBuilder` with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            console_override: None,
        }
    }

    /// Overrides the console sink for testing.
    pub fn console_override(mut self, console: Console) -> Self {
        self.console_override = Some(console);
        self
    }

    /// Builds the application.
    pub fn build(self) -> Result<App> {
        let console = self.console_override.unwrap_or_else(Console::stdout);
        let pipeline = setup_notification_pipeline(&self.config, console)?;
        Ok(App {
            config: self.config,
            pipeline,
        })
    }
}
