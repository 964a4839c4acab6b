//! Output format configuration for records
//!
//! Provides different renderings of a [`Record`]:
//! - Text: Human-readable format (default)
//! - Json: one JSON object per line, keyed by the reserved field names
//! - Logfmt: key=value pairs, keyed by the reserved field names
//!
//! In the structured formats the record's own level, message and timestamp
//! take precedence over attached fields with the same name.

use super::field_names::{FIELD_NAME_LOG_LEVEL, FIELD_NAME_MESSAGE, FIELD_NAME_TIMESTAMP};
use super::field_value::FieldValue;
use super::record::Record;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Example: `[2025-01-08T10:30:45.123Z] [INFO   ] Request processed user=alice`
    #[default]
    Text,

    /// Example: `{"level":"INFO","message":"Request processed","timestamp":"...","user":"alice"}`
    Json,

    /// Example: `timestamp=2025-01-08T10:30:45.123Z level=INFO message="Request processed" user=alice`
    Logfmt,
}

impl OutputFormat {
    /// Render a record according to this output format
    pub fn format(&self, record: &Record, timestamp_format: &TimestampFormat) -> String {
        match self {
            OutputFormat::Text => self.format_text(record, timestamp_format),
            OutputFormat::Json => self.format_json(record, timestamp_format),
            OutputFormat::Logfmt => self.format_logfmt(record, timestamp_format),
        }
    }

    fn format_text(&self, record: &Record, timestamp_format: &TimestampFormat) -> String {
        let base = format!(
            "[{}] [{:7}] {}",
            timestamp_format.format(&record.timestamp),
            record.severity,
            escape_control(&record.message)
        );

        if record.fields.is_empty() {
            base
        } else {
            format!("{} {}", base, escape_control(&record.fields.format_fields()))
        }
    }

    fn format_json(&self, record: &Record, timestamp_format: &TimestampFormat) -> String {
        let mut json_obj = serde_json::Map::new();

        for (key, value) in record.fields.iter() {
            json_obj.insert(key.clone(), value.to_json_value());
        }

        json_obj.insert(
            FIELD_NAME_TIMESTAMP.to_string(),
            timestamp_format.to_json_value(&record.timestamp),
        );
        json_obj.insert(
            FIELD_NAME_LOG_LEVEL.to_string(),
            serde_json::Value::String(record.severity.to_string()),
        );
        json_obj.insert(
            FIELD_NAME_MESSAGE.to_string(),
            serde_json::Value::String(record.message.clone()),
        );

        serde_json::Value::Object(json_obj).to_string()
    }

    fn format_logfmt(&self, record: &Record, timestamp_format: &TimestampFormat) -> String {
        let mut parts = vec![
            format!(
                "{}={}",
                FIELD_NAME_TIMESTAMP,
                escape_logfmt_value(&timestamp_format.format(&record.timestamp))
            ),
            format!("{}={}", FIELD_NAME_LOG_LEVEL, escape_logfmt_value(&record.severity.to_string())),
            // message is always quoted
            format!("{}={}", FIELD_NAME_MESSAGE, quote_logfmt_value(&record.message)),
        ];

        for (key, value) in record.fields.iter() {
            if matches!(
                key.as_str(),
                FIELD_NAME_TIMESTAMP | FIELD_NAME_LOG_LEVEL | FIELD_NAME_MESSAGE
            ) {
                continue;
            }
            let formatted_value = match value {
                FieldValue::String(s) => escape_logfmt_value(s),
                FieldValue::List(_) | FieldValue::Map(_) => quote_logfmt_value(&value.to_string()),
                other => other.to_string(),
            };
            parts.push(format!("{}={}", escape_logfmt_key(key), formatted_value));
        }

        parts.join(" ")
    }
}

/// Keep only characters that are safe in a logfmt key
fn escape_logfmt_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.'))
        .collect()
}

/// Escape newlines, carriage returns and tabs so one record stays on one line
pub(crate) fn escape_control(value: &str) -> String {
    value
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Quote a logfmt value if it contains spaces, quotes, `=` or control characters
fn escape_logfmt_value(value: &str) -> String {
    if value.is_empty() || value.contains([' ', '"', '=']) || value.contains(char::is_control) {
        quote_logfmt_value(value)
    } else {
        value.to_string()
    }
}

fn quote_logfmt_value(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escape_control(&escaped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fields, Severity};

    #[test]
    fn test_text_format() {
        let record = Record::new(Severity::NOTICE, "Test message");
        let result = OutputFormat::Text.format(&record, &TimestampFormat::Iso8601);

        assert!(result.contains("[NOTICE ]"));
        assert!(result.ends_with("Test message"));
    }

    #[test]
    fn test_text_format_with_fields() {
        let fields = Fields::new().with("user_id", 123).with("action", "login");
        let record = Record::new(Severity::INFO, "User logged in").with_fields(fields);
        let result = OutputFormat::Text.format(&record, &TimestampFormat::Iso8601);

        assert!(result.ends_with("User logged in action=login user_id=123"));
    }

    #[test]
    fn test_json_uses_reserved_names() {
        let fields = Fields::new()
            .with("request_id", "abc-123")
            .with("caller:line", 42);
        let record = Record::new(Severity::ERROR, "Error occurred").with_fields(fields);
        let result = OutputFormat::Json.format(&record, &TimestampFormat::Iso8601);

        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["level"], "ERROR");
        assert_eq!(parsed["message"], "Error occurred");
        assert!(parsed["timestamp"].is_string());
        assert_eq!(parsed["request_id"], "abc-123");
        assert_eq!(parsed["caller:line"], 42);
    }

    #[test]
    fn test_json_record_wins_over_fields() {
        let fields = Fields::new().with("message", "spoofed").with("level", "DEBUG");
        let record = Record::new(Severity::WARNING, "real").with_fields(fields);
        let result = OutputFormat::Json.format(&record, &TimestampFormat::UnixMillis);

        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["message"], "real");
        assert_eq!(parsed["level"], "WARNING");
        assert!(parsed["timestamp"].is_number());
    }

    #[test]
    fn test_logfmt_format() {
        let fields = Fields::new()
            .with("user", "alice")
            .with("count", 5)
            .with("query", "SELECT * FROM users WHERE id=1");
        let record = Record::new(Severity::WARNING, "Warning message").with_fields(fields);
        let result = OutputFormat::Logfmt.format(&record, &TimestampFormat::Iso8601);

        assert!(result.contains("level=WARNING"));
        assert!(result.contains("message=\"Warning message\""));
        assert!(result.contains("user=alice"));
        assert!(result.contains("count=5"));
        assert!(result.contains("query=\"SELECT * FROM users WHERE id=1\""));
    }

    #[test]
    fn test_logfmt_keeps_namespaced_keys() {
        let fields = Fields::new().with("caller:file", "src/main.rs");
        let record = Record::new(Severity::DEBUG, "x").with_fields(fields);
        let result = OutputFormat::Logfmt.format(&record, &TimestampFormat::Iso8601);

        assert!(result.contains("caller:file=src/main.rs"));
    }

    fn forged_record() -> Record {
        Record::new(Severity::INFO, "ok\r\nINFO fake").with_fields(
            Fields::new()
                .with("user", "bob\nERROR forged")
                .with("tabbed", "a\tb"),
        )
    }

    #[test]
    fn test_text_escapes_message_and_fields() {
        let result = OutputFormat::Text.format(&forged_record(), &TimestampFormat::Iso8601);

        assert_eq!(result.lines().count(), 1);
        assert!(result.contains("ok\\r\\nINFO fake"));
        assert!(result.ends_with("tabbed=a\\tb user=bob\\nERROR forged"));
    }

    #[test]
    fn test_logfmt_escapes_message_and_fields() {
        let result = OutputFormat::Logfmt.format(&forged_record(), &TimestampFormat::Iso8601);

        assert_eq!(result.lines().count(), 1);
        assert!(result.contains("message=\"ok\\r\\nINFO fake\""));
        assert!(result.contains("user=\"bob\\nERROR forged\""));
        assert!(result.contains("tabbed=\"a\\tb\""));
    }

    #[test]
    fn test_json_keeps_multiline_message() {
        let result = OutputFormat::Json.format(&forged_record(), &TimestampFormat::Iso8601);

        assert_eq!(result.lines().count(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["message"], "ok\r\nINFO fake");
        assert_eq!(parsed["user"], "bob\nERROR forged");
    }

    #[test]
    fn test_output_format_serde() {
        let format: OutputFormat = serde_json::from_str("\"logfmt\"").unwrap();
        assert_eq!(format, OutputFormat::Logfmt);
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
