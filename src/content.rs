//! Content pipeline: a base message wrapped in ordered decorations.

use chrono::{Local, NaiveDateTime};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A transformation that wraps content with additional text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoration {
    /// Prefixes the current local time.
    Timestamp,
    /// Prefixes a fixed instant.
    TimestampAt(NaiveDateTime),
    /// Appends a `-- <name>` signature line.
    Signature(String),
}

impl Decoration {
    /// Applies this decoration to `inner`, returning the wrapped string.
    pub fn apply(&self, inner: &str) -> String {
        match self {
            Decoration::Timestamp => stamp(&Local::now().naive_local(), inner),
            Decoration::TimestampAt(at) => stamp(at, inner),
            Decoration::Signature(name) => format!("{}\n-- {}", inner, name),
        }
    }
}

fn stamp(at: &NaiveDateTime, inner: &str) -> String {
    format!("[{}] {}", at.format(TIMESTAMP_FORMAT), inner)
}

/// Applies `decorations` to `base` in order; the last one is outermost.
pub fn build(base: &str, decorations: &[Decoration]) -> String {
    decorations
        .iter()
        .fold(base.to_string(), |acc, decoration| decoration.apply(&acc))
}

/// A base message together with the decorations to apply to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notification {
    base: String,
    decorations: Vec<Decoration>,
}

impl Notification {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            decorations: Vec::new(),
        }
    }

    /// Adds `decoration` as the new outermost layer.
    pub fn decorate(mut self, decoration: Decoration) -> Self {
        self.decorations.push(decoration);
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// Renders the fully decorated content.
    pub fn render(&self) -> String {
        build(&self.base, &self.decorations)
    }
}
