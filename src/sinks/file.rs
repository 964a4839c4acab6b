//! File sink implementation

use crate::core::{LoggerError, OutputFormat, Record, Result, Sink, TimestampFormat};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one rendered record per line to a file
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        })
    }

    /// Set the timestamp format for this sink
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use logx::sinks::FileSink;
    /// use logx::{OutputFormat, TimestampFormat};
    ///
    /// let sink = FileSink::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_output_format(OutputFormat::Json)
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&mut self, record: &Record) -> Result<()> {
        let mut output = self.output_format.format(record, &self.timestamp_format);
        output.push('\n');

        self.writer.write_all(output.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
