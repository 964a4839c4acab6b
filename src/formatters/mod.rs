//! Formatter implementations
//!
//! Each formatter returns a fresh message and field mapping and leaves its
//! inputs untouched. They can be combined with [`ChainFormatter`].

use crate::core::{FieldValue, Fields, Formatter};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Passes message and fields through unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityFormatter;

impl Formatter for IdentityFormatter {
    fn format(&self, message: &str, fields: &Fields) -> (String, Fields) {
        (message.to_string(), fields.clone())
    }

    fn name(&self) -> &str {
        "identity"
    }
}

/// Replaces the values of sensitive fields with a placeholder
#[derive(Debug, Clone)]
pub struct RedactFormatter {
    names: BTreeSet<String>,
    placeholder: String,
}

impl RedactFormatter {
    pub const DEFAULT_PLACEHOLDER: &'static str = "[REDACTED]";

    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            placeholder: Self::DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

impl Formatter for RedactFormatter {
    fn format(&self, message: &str, fields: &Fields) -> (String, Fields) {
        let mut out = fields.clone();
        for name in &self.names {
            if out.contains_key(name) {
                out.insert(name.as_str(), self.placeholder.as_str());
            }
        }
        (message.to_string(), out)
    }

    fn name(&self) -> &str {
        "redact"
    }
}

/// Renames fields, e.g. to match the key conventions of a third-party backend
#[derive(Debug, Clone, Default)]
pub struct FieldRenameFormatter {
    renames: Vec<(String, String)>,
}

impl FieldRenameFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.renames.push((from.into(), to.into()));
        self
    }
}

impl Formatter for FieldRenameFormatter {
    fn format(&self, message: &str, fields: &Fields) -> (String, Fields) {
        let mut out = fields.clone();
        for (from, to) in &self.renames {
            if let Some(value) = out.remove(from) {
                out.insert(to.as_str(), value);
            }
        }
        (message.to_string(), out)
    }

    fn name(&self) -> &str {
        "rename"
    }
}

/// Prefixes the message with the values of the given fields, `[a=1 b=2] msg`
///
/// The fields themselves stay in the mapping unless `consume` is set.
#[derive(Debug, Clone)]
pub struct MessagePrefixFormatter {
    names: Vec<String>,
    consume: bool,
}

impl MessagePrefixFormatter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            consume: false,
        }
    }

    /// Drop the prefixed fields from the returned mapping
    #[must_use]
    pub fn consume(mut self, consume: bool) -> Self {
        self.consume = consume;
        self
    }
}

impl Formatter for MessagePrefixFormatter {
    fn format(&self, message: &str, fields: &Fields) -> (String, Fields) {
        let mut out = fields.clone();
        let mut parts = Vec::new();
        for name in &self.names {
            let value: Option<FieldValue> = if self.consume {
                out.remove(name)
            } else {
                out.get(name).cloned()
            };
            if let Some(value) = value {
                parts.push(format!("{}={}", name, value));
            }
        }

        if parts.is_empty() {
            return (message.to_string(), out);
        }
        (format!("[{}] {}", parts.join(" "), message), out)
    }

    fn name(&self) -> &str {
        "prefix"
    }
}

/// Applies formatters in order, feeding each one the previous output
#[derive(Clone, Default)]
pub struct ChainFormatter {
    formatters: Vec<Arc<dyn Formatter>>,
}

impl ChainFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn then(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatters.push(formatter);
        self
    }

    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }
}

impl Formatter for ChainFormatter {
    fn format(&self, message: &str, fields: &Fields) -> (String, Fields) {
        self.formatters.iter().fold(
            (message.to_string(), fields.clone()),
            |(message, fields), formatter| formatter.format(&message, &fields),
        )
    }

    fn name(&self) -> &str {
        "chain"
    }
}
