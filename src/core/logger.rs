//! Reference implementation of the logging contract
//!
//! A [`Logger`] is a cheap, immutable value. Deriving a logger with
//! [`with_field`](Logger::with_field) or [`with_formatter`](Logger::with_formatter)
//! copies the handle and extends it; the sinks, metrics and terminator stay
//! shared between a logger and everything derived from it.
//!
//! Records are rendered and written while the sink lock is held, so records
//! emitted concurrently through the same sinks never interleave.

use super::{
    caller::Caller,
    config::LoggerConfig,
    error::Result,
    field_value::FieldValue,
    fields::Fields,
    formatter::{apply_formatter, Formatter},
    metrics::LoggerMetrics,
    printf::{sprint, sprintf},
    record::Record,
    severity::Severity,
    sink::Sink,
    terminator::{ProcessTerminator, Terminator},
    traits::{Adapter, Log, LogF, StructuredLogger},
};
use crate::sinks::{ConsoleSink, FileSink};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Logger {
    sinks: Arc<Mutex<Vec<Box<dyn Sink>>>>,
    /// Metrics for observability (emitted, filtered, failures)
    metrics: Arc<LoggerMetrics>,
    terminator: Arc<dyn Terminator>,
    min_severity: Severity,
    print_severity: Severity,
    fields: Fields,
    formatter: Option<Arc<dyn Formatter>>,
}

impl Logger {
    /// A logger without sinks; add them through [`Logger::builder`]
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    /// Derive a logger with one more field; `self` is left untouched
    #[must_use]
    pub fn with_field(&self, name: impl Into<String>, value: impl Into<FieldValue>) -> Logger {
        Logger {
            fields: self.fields.with(name, value),
            ..self.clone()
        }
    }

    /// Derive a logger with all of `fields` added, overriding existing names
    #[must_use]
    pub fn with_fields(&self, fields: &Fields) -> Logger {
        Logger {
            fields: self.fields.merged(fields),
            ..self.clone()
        }
    }

    /// Derive a logger carrying the `caller:*` fields of `caller`
    #[must_use]
    pub fn with_caller(&self, caller: &Caller) -> Logger {
        self.with_fields(&caller.to_fields())
    }

    /// Derive a logger whose records pass through `formatter`
    ///
    /// The derived logger writes to the same sinks; `self` keeps its formatter.
    #[must_use]
    pub fn with_formatter(&self, formatter: Arc<dyn Formatter>) -> Logger {
        Logger {
            formatter: Some(formatter),
            ..self.clone()
        }
    }

    /// Derive a logger that emits records untransformed
    #[must_use]
    pub fn without_formatter(&self) -> Logger {
        Logger {
            formatter: None,
            ..self.clone()
        }
    }

    /// Derive a logger with a different threshold sharing the same sinks
    #[must_use]
    pub fn with_min_severity(&self, severity: Severity) -> Logger {
        Logger {
            min_severity: severity,
            ..self.clone()
        }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }

    pub fn print_severity(&self) -> Severity {
        self.print_severity
    }

    pub fn has_formatter(&self) -> bool {
        self.formatter.is_some()
    }

    /// Fatal and panic records are always enabled
    #[inline]
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity >= self.min_severity || severity >= Severity::FATAL
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use logx::{Logger, StructuredLogger};
    ///
    /// let logger = Logger::new();
    /// logger.infof("ready in %dms", &[12.into()]);
    /// println!("Emitted: {}", logger.metrics().emitted());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.lock().len()
    }

    pub fn flush(&self) -> Result<()> {
        let mut sinks = self.sinks.lock();
        for sink in sinks.iter_mut() {
            sink.flush()?;
        }
        Ok(())
    }

    fn emit(&self, severity: Severity, message: &str) {
        if !self.is_enabled(severity) {
            self.metrics.record_filtered();
            return;
        }

        let (message, fields) = match self.formatter {
            Some(ref formatter) => {
                let (message, fields, fell_back) =
                    apply_formatter(formatter.as_ref(), message, &self.fields);
                if fell_back {
                    self.metrics.record_formatter_fallback();
                }
                (message, fields)
            }
            None => (message.to_string(), self.fields.clone()),
        };

        // timestamp under the lock so sinks see records in time order
        let mut sinks = self.sinks.lock();
        let record = Record::new(severity, &message).with_fields(fields);
        Self::process(&mut sinks, &record, &self.metrics);
    }

    /// Write a record to every sink with per-sink panic isolation
    ///
    /// One failing sink doesn't prevent the others from receiving the record.
    fn process(sinks: &mut [Box<dyn Sink>], record: &Record, metrics: &LoggerMetrics) {
        let mut has_error = false;

        for (idx, sink) in sinks.iter_mut().enumerate() {
            let write_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                sink.write(record)
            }));

            match write_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Sink #{} ({}) failed: {}", idx, sink.name(), e);
                    has_error = true;
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Sink #{} ({}) panicked: {}. \
                         Other sinks continue to function.",
                        idx,
                        sink.name(),
                        panic_msg
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            metrics.record_sink_failure();
        } else {
            metrics.record_emitted();
        }
    }

    fn flush_before_termination(&self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush before termination: {}", e);
        }
    }

    fn fatal_message(&self, message: &str) {
        self.emit(Severity::FATAL, message);
        self.flush_before_termination();
        self.terminator.exit(1);
    }

    fn panic_message(&self, message: &str) {
        self.emit(Severity::PANIC, message);
        self.flush_before_termination();
        self.terminator.panic(message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_severity", &self.min_severity)
            .field("print_severity", &self.print_severity)
            .field("fields", &self.fields)
            .field("formatter", &self.formatter.as_ref().map(|fm| fm.name().to_string()))
            .field("sinks", &self.sink_count())
            .finish()
    }
}

impl Log for Logger {
    fn fatal(&self, values: &[FieldValue]) {
        self.fatal_message(&sprint(values));
    }

    fn panic(&self, values: &[FieldValue]) {
        self.panic_message(&sprint(values));
    }

    fn print(&self, values: &[FieldValue]) {
        self.emit(self.print_severity, &sprint(values));
    }
}

impl LogF for Logger {
    fn fatalf(&self, template: &str, args: &[FieldValue]) {
        self.fatal_message(&sprintf(template, args));
    }

    fn panicf(&self, template: &str, args: &[FieldValue]) {
        self.panic_message(&sprintf(template, args));
    }

    fn printf(&self, template: &str, args: &[FieldValue]) {
        self.emit(self.print_severity, &sprintf(template, args));
    }
}

impl StructuredLogger for Logger {
    fn log(&self, severity: Severity, message: &str) {
        self.emit(severity, message);
    }

    fn with_field(&self, name: &str, value: FieldValue) -> Box<dyn StructuredLogger> {
        Box::new(Logger::with_field(self, name, value))
    }

    fn fields(&self) -> Fields {
        self.fields.clone()
    }
}

impl Adapter for Logger {
    fn with_formatter(&self, formatter: Arc<dyn Formatter>) -> Box<dyn Adapter> {
        Box::new(Logger::with_formatter(self, formatter))
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use logx::prelude::*;
/// use std::sync::Arc;
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder()
///     .min_severity(Severity::INFO)
///     .sink(sink.clone())
///     .field("service", "checkout")
///     .formatter(Arc::new(RedactFormatter::new(["password"])))
///     .build();
///
/// logger.infof("login for %s", &["alice".into()]);
/// assert_eq!(sink.messages(), vec!["login for alice".to_string()]);
/// ```
pub struct LoggerBuilder {
    min_severity: Severity,
    print_severity: Severity,
    sinks: Vec<Box<dyn Sink>>,
    formatter: Option<Arc<dyn Formatter>>,
    terminator: Arc<dyn Terminator>,
    fields: Fields,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_severity: Severity::DEBUG,
            print_severity: Severity::INFO,
            sinks: Vec::new(),
            formatter: None,
            terminator: Arc::new(ProcessTerminator),
            fields: Fields::new(),
        }
    }

    /// Create a builder with the sinks and settings described by `config`
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Self::new()
            .min_severity(config.min_severity)
            .print_severity(config.print_severity)
            .fields(config.fields.clone());

        if config.console {
            builder = builder.sink(
                ConsoleSink::with_colors(config.colors)
                    .with_output_format(config.format.clone())
                    .with_timestamp_format(config.timestamp_format.clone()),
            );
        }

        if let Some(ref path) = config.file {
            builder = builder.sink(
                FileSink::new(path)?
                    .with_output_format(config.format.clone())
                    .with_timestamp_format(config.timestamp_format.clone()),
            );
        }

        Ok(builder)
    }

    /// Set minimum severity; fatal and panic records always pass
    #[must_use = "builder methods return a new value"]
    pub fn min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    /// Set the severity used by `print` and `printf`
    #[must_use = "builder methods return a new value"]
    pub fn print_severity(mut self, severity: Severity) -> Self {
        self.print_severity = severity;
        self
    }

    /// Add a sink
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Add an already boxed sink
    #[must_use = "builder methods return a new value"]
    pub fn boxed_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Replace the strategy invoked after fatal and panic records
    #[must_use = "builder methods return a new value"]
    pub fn terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = terminator;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name, value);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fields(mut self, fields: Fields) -> Self {
        self.fields = self.fields.merged(&fields);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            sinks: Arc::new(Mutex::new(self.sinks)),
            metrics: Arc::new(LoggerMetrics::new()),
            terminator: self.terminator,
            min_severity: self.min_severity,
            print_severity: self.print_severity,
            fields: self.fields,
            formatter: self.formatter,
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use logx::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_severity(Severity::NOTICE)
    ///     .sink(ConsoleSink::new())
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
