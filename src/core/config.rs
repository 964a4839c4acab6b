//! Declarative logger configuration
//!
//! ```
//! use logx::{LoggerBuilder, LoggerConfig, Severity};
//!
//! let config = LoggerConfig::from_json_str(
//!     r#"{"min_severity": "notice", "format": "json", "console": false,
//!         "fields": {"service": "billing"}}"#,
//! )
//! .unwrap();
//! assert_eq!(config.min_severity, Severity::NOTICE);
//!
//! let logger = LoggerBuilder::from_config(&config).unwrap().build();
//! assert!(logger.fields().contains_key("service"));
//! ```

use super::error::{LoggerError, Result};
use super::fields::Fields;
use super::output_format::OutputFormat;
use super::severity::Severity;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Records below this severity are discarded (fatal and panic never are)
    pub min_severity: Severity,
    /// Severity used by `print`/`printf`
    pub print_severity: Severity,
    pub format: OutputFormat,
    pub timestamp_format: TimestampFormat,
    /// Colorize text output on the console
    pub colors: bool,
    /// Write to stdout/stderr
    pub console: bool,
    /// Also append to this file
    pub file: Option<PathBuf>,
    /// Fields attached to every record
    pub fields: Fields,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_severity: Severity::DEBUG,
            print_severity: Severity::INFO,
            format: OutputFormat::default(),
            timestamp_format: TimestampFormat::default(),
            colors: true,
            console: true,
            file: None,
            fields: Fields::new(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject thresholds that filter out every regular severity
    pub fn validate(&self) -> Result<()> {
        if self.min_severity > Severity::PANIC {
            return Err(LoggerError::config(
                "min_severity",
                format!("{} is above PANIC; only fatal and panic records would pass", self.min_severity),
            ));
        }
        if let Some(ref path) = self.file {
            if path.as_os_str().is_empty() {
                return Err(LoggerError::config("file", "path is empty"));
            }
        }
        Ok(())
    }
}
