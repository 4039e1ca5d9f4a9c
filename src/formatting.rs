// src/formatting.rs

use crate::config::OutputFormat;
use serde::Serialize;

/// One block of console output: who produced it, a headline, and the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<'a> {
    /// Bracketed tag, e.g. `Email` or `Logger`.
    pub tag: &'a str,
    pub headline: String,
    pub content: &'a str,
}

/// A trait for formatting an envelope into the text written to a sink.
pub trait TextFormatter: Send + Sync {
    fn format(&self, envelope: &Envelope<'_>) -> String;
}

/// Human-readable blocks, each followed by a blank line:
///
/// ```text
/// [Email] Sent to abc@outlook.com:
/// <content>
/// ```
pub struct PlainTextFormatter;

impl TextFormatter for PlainTextFormatter {
    fn format(&self, envelope: &Envelope<'_>) -> String {
        format!(
            "[{}] {}:\n{}\n\n",
            envelope.tag, envelope.headline, envelope.content
        )
    }
}

/// One JSON object per line.
pub struct JsonFormatter;

impl TextFormatter for JsonFormatter {
    fn format(&self, envelope: &Envelope<'_>) -> String {
        // Serializing a struct of strings cannot fail.
        let line = serde_json::to_string(envelope).unwrap_or_default();
        format!("{}\n", line)
    }
}

/// Returns the formatter for the configured output format.
pub fn formatter_for(format: &OutputFormat) -> Box<dyn TextFormatter> {
    match format {
        OutputFormat::PlainText => Box::new(PlainTextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
