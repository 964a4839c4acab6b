//! Integration tests for the reference logger
//!
//! These tests verify:
//! - Log injection prevention
//! - File output in every output format
//! - Configuration from JSON
//! - Formatters and reserved fields end to end
//! - Timestamp format support

use logx::formatters::{ChainFormatter, MessagePrefixFormatter, RedactFormatter};
use logx::sinks::{FileSink, MemorySink};
use logx::{
    Caller, Fields, Logger, LoggerBuilder, LoggerConfig, LoggerError, OutputFormat, Severity,
    StructuredLogger, TimestampFormat, FIELD_NAME_CALLER_FILE, FIELD_NAME_CALLER_LINE,
    FIELD_NAME_HTTP_REQUEST,
};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn file_logger(path: &std::path::Path, format: OutputFormat) -> Logger {
    let sink = FileSink::new(path)
        .expect("Failed to create sink")
        .with_output_format(format);
    Logger::builder().sink(sink).build()
}

#[test]
fn test_log_injection_prevention() {
    // Newlines are escaped so a message can't forge extra log lines
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("injection_test.log");

    let logger = file_logger(&log_file, OutputFormat::Text);

    let malicious_message = "User login\nERROR [2024-10-17] Fake error injected\nINFO Continuation";
    logger.info(&[malicious_message.into()]);
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");

    assert!(content.contains("\\n"));
    assert!(!content.contains("\nERROR [2024-10-17] Fake error injected\n"));

    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1, "Log should be a single line, not multiple");
}

#[test]
fn test_field_values_cannot_forge_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    for (name, format) in [("text.log", OutputFormat::Text), ("logfmt.log", OutputFormat::Logfmt)] {
        let log_file = temp_dir.path().join(name);
        let logger = file_logger(&log_file, format).with_field("user", "bob\nERROR forged");
        logger.info(&["login".into()]);
        logger.flush().expect("Failed to flush");

        let content = fs::read_to_string(&log_file).expect("Failed to read log file");
        assert_eq!(content.lines().count(), 1, "{} split a record: {}", name, content);
        assert!(content.contains("bob\\nERROR forged"));
    }
}

#[test]
fn test_text_file_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("text.log");

    let logger = file_logger(&log_file, OutputFormat::Text).with_field("user", "alice");
    logger.warningf("quota at %d%%", &[91.into()]);
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(content.contains("[WARNING]"));
    assert!(content.contains("quota at 91%"));
    assert!(content.trim_end().ends_with("user=alice"));
}

#[test]
fn test_json_file_output_uses_reserved_names() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("structured.jsonl");

    let logger = file_logger(&log_file, OutputFormat::Json)
        .with_field("user_id", 12345)
        .with_field("action", "login");

    for i in 0..5 {
        logger.infof("event %d", &[i.into()]);
    }
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);

    for (i, line) in lines.iter().enumerate() {
        let parsed: serde_json::Value = serde_json::from_str(line).expect("Invalid JSON");
        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["message"], format!("event {}", i));
        assert_eq!(parsed["user_id"], 12345);
        assert_eq!(parsed["action"], "login");
        assert!(parsed["timestamp"].is_string());
    }
}

#[test]
fn test_json_record_wins_over_colliding_fields() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("collision.jsonl");

    let logger = file_logger(&log_file, OutputFormat::Json)
        .with_field("message", "from field")
        .with_field("level", 1);
    logger.error(&["from record".into()]);
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let parsed: serde_json::Value = serde_json::from_str(content.trim()).expect("Invalid JSON");
    assert_eq!(parsed["message"], "from record");
    assert_eq!(parsed["level"], "ERROR");
}

#[test]
fn test_logfmt_file_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.logfmt");

    let logger = file_logger(&log_file, OutputFormat::Logfmt).with_field("path", "/v1/items");
    logger.notice(&["cache miss".into()]);
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(content.contains("level=NOTICE"));
    assert!(content.contains("message=\"cache miss\""));
    assert!(content.contains("path=/v1/items"));
}

#[test]
fn test_numeric_timestamps() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("unix.jsonl");

    let sink = FileSink::new(&log_file)
        .expect("Failed to create sink")
        .with_output_format(OutputFormat::Json)
        .with_timestamp_format(TimestampFormat::UnixMillis);
    let logger = Logger::builder().sink(sink).build();

    logger.info(&["tick".into()]);
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let parsed: serde_json::Value = serde_json::from_str(content.trim()).expect("Invalid JSON");
    assert!(parsed["timestamp"].as_i64().unwrap() > 1_600_000_000_000);
}

#[test]
fn test_logger_from_json_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("configured.jsonl");

    let json = serde_json::json!({
        "min_severity": "warning",
        "format": "json",
        "console": false,
        "file": log_file,
        "fields": {"service": "billing", "replica": 2}
    })
    .to_string();

    let config = LoggerConfig::from_json_str(&json).expect("Invalid config");
    let logger = LoggerBuilder::from_config(&config)
        .expect("Failed to build logger")
        .build();

    logger.info(&["filtered".into()]);
    logger.error(&["kept".into()]);
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);

    let parsed: serde_json::Value = serde_json::from_str(lines[0]).expect("Invalid JSON");
    assert_eq!(parsed["message"], "kept");
    assert_eq!(parsed["service"], "billing");
    assert_eq!(parsed["replica"], 2);
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = LoggerConfig::from_json_str(r#"{"min_severity": 900}"#).unwrap_err();
    assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

    let err = LoggerConfig::from_json_str(r#"{"colour": true}"#).unwrap_err();
    assert!(matches!(err, LoggerError::JsonError(_)));
}

#[test]
fn test_unwritable_file_fails_at_build() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = LoggerConfig {
        console: false,
        file: Some(temp_dir.path().join("missing").join("app.log")),
        ..LoggerConfig::default()
    };

    let err = LoggerBuilder::from_config(&config).err().expect("build should fail");
    assert!(matches!(err, LoggerError::IoOperation { .. }));
}

#[test]
fn test_formatter_chain_end_to_end() {
    let sink = MemorySink::new();
    let chain = ChainFormatter::new()
        .then(Arc::new(RedactFormatter::new(["password"])))
        .then(Arc::new(MessagePrefixFormatter::new(["request_id"]).consume(true)));
    let logger = Logger::builder()
        .sink(sink.clone())
        .formatter(Arc::new(chain))
        .build();

    logger
        .with_field("request_id", "r-7")
        .with_field("password", "hunter2")
        .info(&["login".into()]);

    let record = sink.last().expect("record expected");
    assert_eq!(record.message, "[request_id=r-7] login");
    assert_eq!(record.fields.get("password"), Some(&"[REDACTED]".into()));
    assert!(!record.fields.contains_key("request_id"));
}

#[test]
fn test_caller_and_http_fields() {
    let sink = MemorySink::new();
    let logger: Box<dyn StructuredLogger> = Box::new(Logger::builder().sink(sink.clone()).build());

    let request = Fields::new().with("method", "GET").with("path", "/health");
    let derived = Caller::here()
        .attach(logger.as_ref())
        .with_field(FIELD_NAME_HTTP_REQUEST, request.to_json_value().into());
    derived.debug(&["handled".into()]);

    let record = sink.last().expect("record expected");
    assert_eq!(record.severity, Severity::DEBUG);
    assert!(record.fields.contains_key(FIELD_NAME_CALLER_FILE));
    assert!(record.fields.contains_key(FIELD_NAME_CALLER_LINE));

    let request = record.fields.get(FIELD_NAME_HTTP_REQUEST).expect("request field");
    assert_eq!(request.to_json_value()["path"], "/health");
}
