//! Formatter contract
//!
//! A formatter post-processes a message and its fields before they reach the
//! sink. It must accept any input and must return new values instead of
//! mutating the ones it was given.

use super::error::LoggerError;
use super::fields::Fields;
use std::panic::{catch_unwind, AssertUnwindSafe};

pub trait Formatter: Send + Sync {
    /// Transform `message` and `fields` into the pair handed to the sink
    fn format(&self, message: &str, fields: &Fields) -> (String, Fields);

    fn name(&self) -> &str {
        "formatter"
    }
}

impl<F> Formatter for F
where
    F: Fn(&str, &Fields) -> (String, Fields) + Send + Sync,
{
    fn format(&self, message: &str, fields: &Fields) -> (String, Fields) {
        self(message, fields)
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// Run `formatter`, falling back to the untransformed input if it panics
///
/// Returns the pair to emit and whether the fallback was taken.
pub(crate) fn apply_formatter(
    formatter: &dyn Formatter,
    message: &str,
    fields: &Fields,
) -> (String, Fields, bool) {
    match catch_unwind(AssertUnwindSafe(|| formatter.format(message, fields))) {
        Ok((message, fields)) => (message, fields, false),
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            eprintln!(
                "[LOGGER ERROR] {}. Emitting unformatted record.",
                LoggerError::formatter(formatter.name(), format!("panicked: {}", panic_msg))
            );
            (message.to_string(), fields.clone(), true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_formatter() {
        let upper = |message: &str, fields: &Fields| (message.to_uppercase(), fields.clone());
        let (message, fields) = upper.format("hello", &Fields::new());
        assert_eq!(message, "HELLO");
        assert!(fields.is_empty());
    }

    #[test]
    fn test_apply_formatter_fallback() {
        let broken = |_: &str, _: &Fields| -> (String, Fields) { panic!("cannot format") };
        let fields = Fields::new().with("k", "v");

        let (message, out, fell_back) = apply_formatter(&broken, "original", &fields);
        assert!(fell_back);
        assert_eq!(message, "original");
        assert_eq!(out, fields);
    }

    #[test]
    fn test_apply_formatter_success() {
        let tag = |message: &str, fields: &Fields| (message.to_string(), fields.with("tag", 1));
        let (message, out, fell_back) = apply_formatter(&tag, "m", &Fields::new());
        assert!(!fell_back);
        assert_eq!(message, "m");
        assert!(out.contains_key("tag"));
    }
}
