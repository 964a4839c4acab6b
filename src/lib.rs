//! # logx
//!
//! A structured logging contract for applications and libraries, plus a
//! reference implementation.
//!
//! Code that logs depends on the [`StructuredLogger`] trait (or the narrower
//! [`Log`] and [`LogF`]) and never on a concrete backend. [`Logger`] is the
//! bundled implementation, writing to pluggable sinks.
//!
//! ## Features
//!
//! - **Seven severities**: `DEBUG` (100) through `PANIC` (700), open to
//!   intermediate values
//! - **Immutable field chains**: `with_field` derives a new logger and never
//!   touches the one it was called on
//! - **Formatters**: post-process message and fields before they reach a sink
//! - **Reserved field names**: shared keys for level, message, timestamp,
//!   caller and HTTP data
//!
//! ## Example
//!
//! ```
//! use logx::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder().sink(sink.clone()).build();
//!
//! let request_logger = logger.with_field("request_id", "r-42");
//! request_logger.infof("served %s in %dms", &["/health".into(), 3.into()]);
//!
//! let record = sink.last().unwrap();
//! assert_eq!(record.message, "served /health in 3ms");
//! assert_eq!(record.severity, Severity::INFO);
//! ```

pub mod core;
pub mod formatters;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Adapter, Caller, FieldValue, Fields, Formatter, Log, LogF, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, Result, Severity, Sink, StructuredLogger,
    };
    pub use crate::formatters::{
        ChainFormatter, FieldRenameFormatter, IdentityFormatter, MessagePrefixFormatter,
        RedactFormatter,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink};
}

pub use crate::core::{
    field_names, is_reserved, sprint, sprintf, Adapter, Caller, FieldValue, Fields, Formatter,
    Log, LogF, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OutputFormat,
    ProcessTerminator, Record, RecordingTerminator, Result, Severity, Sink, StructuredLogger,
    Terminator, TimestampFormat, FIELD_NAME_CALLER_FILE, FIELD_NAME_CALLER_FUNC,
    FIELD_NAME_CALLER_LINE, FIELD_NAME_HTTP_REQUEST, FIELD_NAME_HTTP_RESPONSE,
    FIELD_NAME_LOG_LEVEL, FIELD_NAME_MESSAGE, FIELD_NAME_TIMESTAMP, LOG_LEVEL_DEBUG,
    LOG_LEVEL_ERROR, LOG_LEVEL_FATAL, LOG_LEVEL_INFO, LOG_LEVEL_NOTICE, LOG_LEVEL_PANIC,
    LOG_LEVEL_WARNING, RESERVED_FIELD_NAMES,
};
pub use crate::sinks::{ConsoleSink, FileSink, MemorySink};
