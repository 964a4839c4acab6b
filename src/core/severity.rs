//! Severity definitions
//!
//! Severities are plain integers spaced by 100 so that new levels can be
//! inserted between the canonical ones without renumbering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const LOG_LEVEL_DEBUG: i32 = 100;
pub const LOG_LEVEL_INFO: i32 = 200;
pub const LOG_LEVEL_NOTICE: i32 = 300;
pub const LOG_LEVEL_WARNING: i32 = 400;
pub const LOG_LEVEL_ERROR: i32 = 500;
pub const LOG_LEVEL_FATAL: i32 = 600;
pub const LOG_LEVEL_PANIC: i32 = 700;

/// Ordered severity of a log record. Higher is more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "SeverityRepr")]
pub struct Severity(i32);

impl Severity {
    pub const DEBUG: Severity = Severity(LOG_LEVEL_DEBUG);
    pub const INFO: Severity = Severity(LOG_LEVEL_INFO);
    pub const NOTICE: Severity = Severity(LOG_LEVEL_NOTICE);
    pub const WARNING: Severity = Severity(LOG_LEVEL_WARNING);
    pub const ERROR: Severity = Severity(LOG_LEVEL_ERROR);
    pub const FATAL: Severity = Severity(LOG_LEVEL_FATAL);
    pub const PANIC: Severity = Severity(LOG_LEVEL_PANIC);

    /// The canonical severities in ascending order
    pub const CANONICAL: [Severity; 7] = [
        Severity::DEBUG,
        Severity::INFO,
        Severity::NOTICE,
        Severity::WARNING,
        Severity::ERROR,
        Severity::FATAL,
        Severity::PANIC,
    ];

    /// Wrap an arbitrary severity value
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Severity(value)
    }

    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Canonical name, or `None` for values between the canonical ones
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        match self.0 {
            LOG_LEVEL_DEBUG => Some("DEBUG"),
            LOG_LEVEL_INFO => Some("INFO"),
            LOG_LEVEL_NOTICE => Some("NOTICE"),
            LOG_LEVEL_WARNING => Some("WARNING"),
            LOG_LEVEL_ERROR => Some("ERROR"),
            LOG_LEVEL_FATAL => Some("FATAL"),
            LOG_LEVEL_PANIC => Some("PANIC"),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_canonical(self) -> bool {
        self.name().is_some()
    }

    /// Records at or above this severity go to stderr on the console
    #[must_use]
    pub fn is_critical(self) -> bool {
        self >= Severity::ERROR
    }

    #[cfg(feature = "console")]
    pub fn color_code(self) -> colored::Color {
        use colored::Color::*;
        match self {
            s if s < Severity::INFO => Blue,
            s if s < Severity::NOTICE => Green,
            s if s < Severity::WARNING => Cyan,
            s if s < Severity::ERROR => Yellow,
            s if s < Severity::FATAL => Red,
            _ => BrightRed,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::INFO
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            // `pad` keeps width/alignment flags working for column output
            Some(name) => f.pad(name),
            None => f.pad(&format!("LEVEL({})", self.0)),
        }
    }
}

impl From<Severity> for i32 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

impl From<i32> for Severity {
    fn from(value: i32) -> Self {
        Severity(value)
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<i32>() {
            return Ok(Severity(value));
        }
        match trimmed.to_uppercase().as_str() {
            "DEBUG" => Ok(Severity::DEBUG),
            "INFO" => Ok(Severity::INFO),
            "NOTICE" => Ok(Severity::NOTICE),
            "WARNING" | "WARN" => Ok(Severity::WARNING),
            "ERROR" => Ok(Severity::ERROR),
            "FATAL" => Ok(Severity::FATAL),
            "PANIC" => Ok(Severity::PANIC),
            _ => Err(format!("Invalid severity: '{}'", s)),
        }
    }
}

/// Accepts either `400` or `"warning"` when deserializing
#[derive(Deserialize)]
#[serde(untagged)]
enum SeverityRepr {
    Value(i32),
    Name(String),
}

impl TryFrom<SeverityRepr> for Severity {
    type Error = String;

    fn try_from(repr: SeverityRepr) -> Result<Self, Self::Error> {
        match repr {
            SeverityRepr::Value(value) => Ok(Severity(value)),
            SeverityRepr::Name(name) => name.parse(),
        }
    }
}
