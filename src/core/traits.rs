//! Capability traits of the logging contract
//!
//! Application code depends on these traits instead of a concrete logger:
//!
//! - [`Log`]: unformatted emission (`fatal`, `panic`, `print`)
//! - [`LogF`]: printf-style emission (`fatalf`, `panicf`, `printf`)
//! - [`StructuredLogger`]: both of the above, named severity shortcuts and
//!   field attachment
//! - [`Adapter`]: a structured logger whose [`Formatter`] can be swapped
//!
//! Values passed to the unformatted methods are concatenated with
//! [`sprint`](crate::core::printf::sprint); templates are rendered with
//! [`sprintf`](crate::core::printf::sprintf).

use super::field_value::FieldValue;
use super::fields::Fields;
use super::formatter::Formatter;
use super::printf::{sprint, sprintf};
use super::severity::Severity;
use std::sync::Arc;

/// Unformatted emission
pub trait Log {
    /// Emit at [`Severity::FATAL`], then terminate the process with exit code 1
    fn fatal(&self, values: &[FieldValue]);

    /// Emit at [`Severity::PANIC`], then unwind with the rendered message
    fn panic(&self, values: &[FieldValue]);

    /// Emit at the implementation's default severity
    fn print(&self, values: &[FieldValue]);
}

/// Printf-style emission
pub trait LogF {
    /// Same as [`Log::fatal`] with a rendered template
    fn fatalf(&self, template: &str, args: &[FieldValue]);

    /// Same as [`Log::panic`] with a rendered template
    fn panicf(&self, template: &str, args: &[FieldValue]);

    /// Same as [`Log::print`] with a rendered template
    fn printf(&self, template: &str, args: &[FieldValue]);
}

/// Structured, field-carrying logger
///
/// Implementations must be cheap to derive from: [`with_field`](Self::with_field)
/// returns a new logger and leaves the receiver untouched, so the same logger
/// can be shared across threads while children are derived from it.
pub trait StructuredLogger: Log + LogF + Send + Sync {
    /// Emit an already rendered message at `severity`
    fn log(&self, severity: Severity, message: &str);

    /// Derive a logger carrying every field of this one plus `name`
    ///
    /// On a name collision the new value wins.
    fn with_field(&self, name: &str, value: FieldValue) -> Box<dyn StructuredLogger>;

    /// Fields attached to this logger
    fn fields(&self) -> Fields;

    fn debug(&self, values: &[FieldValue]) {
        self.log(Severity::DEBUG, &sprint(values));
    }

    fn debugf(&self, template: &str, args: &[FieldValue]) {
        self.log(Severity::DEBUG, &sprintf(template, args));
    }

    fn info(&self, values: &[FieldValue]) {
        self.log(Severity::INFO, &sprint(values));
    }

    fn infof(&self, template: &str, args: &[FieldValue]) {
        self.log(Severity::INFO, &sprintf(template, args));
    }

    fn notice(&self, values: &[FieldValue]) {
        self.log(Severity::NOTICE, &sprint(values));
    }

    fn noticef(&self, template: &str, args: &[FieldValue]) {
        self.log(Severity::NOTICE, &sprintf(template, args));
    }

    fn warning(&self, values: &[FieldValue]) {
        self.log(Severity::WARNING, &sprint(values));
    }

    fn warningf(&self, template: &str, args: &[FieldValue]) {
        self.log(Severity::WARNING, &sprintf(template, args));
    }

    fn error(&self, values: &[FieldValue]) {
        self.log(Severity::ERROR, &sprint(values));
    }

    fn errorf(&self, template: &str, args: &[FieldValue]) {
        self.log(Severity::ERROR, &sprintf(template, args));
    }
}

/// A structured logger wrapping some sink whose output can be post-processed
pub trait Adapter: StructuredLogger {
    /// Clone this adapter with `formatter` replacing the current one
    ///
    /// The clone writes to the same sinks. The receiver keeps its formatter.
    fn with_formatter(&self, formatter: Arc<dyn Formatter>) -> Box<dyn Adapter>;
}
