//! Timestamp formatting for rendered records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format used by sinks when rendering the `timestamp` field
///
/// # Examples
///
/// ```
/// use logx::TimestampFormat;
/// use chrono::Utc;
///
/// let rendered = TimestampFormat::Iso8601.format(&Utc::now());
/// assert!(rendered.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Seconds since the epoch
    Unix,

    /// Milliseconds since the epoch
    UnixMillis,

    /// Microseconds since the epoch
    UnixMicros,

    /// Any strftime-compatible format string
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimestampFormat::Unix | TimestampFormat::UnixMillis | TimestampFormat::UnixMicros
        )
    }

    /// Numeric formats become JSON numbers, the others JSON strings
    #[must_use]
    pub fn to_json_value(&self, datetime: &DateTime<Utc>) -> serde_json::Value {
        match self {
            TimestampFormat::Unix => datetime.timestamp().into(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().into(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().into(),
            _ => serde_json::Value::String(self.format(datetime)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_iso8601_format() {
        assert_eq!(
            TimestampFormat::Iso8601.format(&fixed_datetime()),
            "2025-01-08T10:30:45.123Z"
        );
        assert_eq!(
            TimestampFormat::Iso8601Micros.format(&fixed_datetime()),
            "2025-01-08T10:30:45.123456Z"
        );
    }

    #[test]
    fn test_unix_formats() {
        let dt = fixed_datetime();
        assert_eq!(TimestampFormat::Unix.format(&dt), "1736332245");
        assert_eq!(TimestampFormat::UnixMillis.format(&dt), "1736332245123");
        assert_eq!(TimestampFormat::UnixMicros.format(&dt), "1736332245123456");
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025/01/08 10:30");
    }

    #[test]
    fn test_json_value_kind() {
        let dt = fixed_datetime();
        assert!(TimestampFormat::UnixMillis.to_json_value(&dt).is_number());
        assert!(TimestampFormat::Rfc3339.to_json_value(&dt).is_string());
        assert!(TimestampFormat::UnixMicros.is_numeric());
        assert!(!TimestampFormat::Iso8601.is_numeric());
    }

    #[test]
    fn test_deserialization() {
        let format: TimestampFormat = serde_json::from_str("\"unix_millis\"").unwrap();
        assert_eq!(format, TimestampFormat::UnixMillis);

        let format: TimestampFormat = serde_json::from_str(r#"{"custom":"%Y-%m-%d"}"#).unwrap();
        assert_eq!(format, TimestampFormat::Custom("%Y-%m-%d".to_string()));
    }
}
