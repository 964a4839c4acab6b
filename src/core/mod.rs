//! Core logging contract and its reference implementation

pub mod caller;
pub mod config;
pub mod error;
pub mod field_names;
pub mod field_value;
pub mod fields;
pub mod formatter;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod printf;
pub mod record;
pub mod severity;
pub mod sink;
pub mod terminator;
pub mod timestamp;
pub mod traits;

pub use caller::Caller;
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use field_names::{
    is_reserved, FIELD_NAME_CALLER_FILE, FIELD_NAME_CALLER_FUNC, FIELD_NAME_CALLER_LINE,
    FIELD_NAME_HTTP_REQUEST, FIELD_NAME_HTTP_RESPONSE, FIELD_NAME_LOG_LEVEL, FIELD_NAME_MESSAGE,
    FIELD_NAME_TIMESTAMP, RESERVED_FIELD_NAMES,
};
pub use field_value::FieldValue;
pub use fields::Fields;
pub use formatter::Formatter;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use printf::{sprint, sprintf};
pub use record::Record;
pub use severity::{
    Severity, LOG_LEVEL_DEBUG, LOG_LEVEL_ERROR, LOG_LEVEL_FATAL, LOG_LEVEL_INFO,
    LOG_LEVEL_NOTICE, LOG_LEVEL_PANIC, LOG_LEVEL_WARNING,
};
pub use sink::Sink;
pub use terminator::{ProcessTerminator, RecordingTerminator, Terminator};
pub use timestamp::TimestampFormat;
pub use traits::{Adapter, Log, LogF, StructuredLogger};
