//! Console sink implementation

use crate::core::{OutputFormat, Record, Result, Sink, TimestampFormat};
#[cfg(feature = "console")]
use crate::core::output_format::escape_control;
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

pub struct ConsoleSink {
    use_colors: bool,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::with_colors(true)
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        }
    }

    /// Set the output format for this sink
    ///
    /// # Example
    ///
    /// ```
    /// use logx::sinks::ConsoleSink;
    /// use logx::OutputFormat;
    ///
    /// let sink = ConsoleSink::new().with_output_format(OutputFormat::Json);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn render(&self, record: &Record) -> String {
        match self.output_format {
            OutputFormat::Text if self.use_colors => self.format_colored(record),
            _ => self.output_format.format(record, &self.timestamp_format),
        }
    }

    #[cfg(feature = "console")]
    fn format_colored(&self, record: &Record) -> String {
        let level = format!("{:7}", record.severity)
            .color(record.severity.color_code())
            .to_string();

        let base = format!(
            "[{}] [{}] {}",
            self.timestamp_format.format(&record.timestamp),
            level,
            escape_control(&record.message)
        );

        if record.fields.is_empty() {
            base
        } else {
            format!("{} {}", base, escape_control(&record.fields.format_fields()).dimmed())
        }
    }

    #[cfg(not(feature = "console"))]
    fn format_colored(&self, record: &Record) -> String {
        OutputFormat::Text.format(record, &self.timestamp_format)
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, record: &Record) -> Result<()> {
        let output = self.render(record);

        // Route ERROR and above to stderr, others to stdout
        if record.severity.is_critical() {
            writeln!(std::io::stderr().lock(), "{}", output)?;
        } else {
            writeln!(std::io::stdout().lock(), "{}", output)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
