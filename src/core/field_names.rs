//! Reserved field names
//!
//! Structured renderers use exactly these keys for the corresponding data so
//! that records from different logger implementations stay comparable.

pub const FIELD_NAME_LOG_LEVEL: &str = "level";
pub const FIELD_NAME_MESSAGE: &str = "message";
pub const FIELD_NAME_TIMESTAMP: &str = "timestamp";
pub const FIELD_NAME_CALLER_FUNC: &str = "caller:func";
pub const FIELD_NAME_CALLER_FILE: &str = "caller:file";
pub const FIELD_NAME_CALLER_LINE: &str = "caller:line";
pub const FIELD_NAME_HTTP_REQUEST: &str = "http:request";
pub const FIELD_NAME_HTTP_RESPONSE: &str = "http:response";

pub const RESERVED_FIELD_NAMES: [&str; 8] = [
    FIELD_NAME_LOG_LEVEL,
    FIELD_NAME_MESSAGE,
    FIELD_NAME_TIMESTAMP,
    FIELD_NAME_CALLER_FUNC,
    FIELD_NAME_CALLER_FILE,
    FIELD_NAME_CALLER_LINE,
    FIELD_NAME_HTTP_REQUEST,
    FIELD_NAME_HTTP_RESPONSE,
];

/// Case-sensitive membership test
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_FIELD_NAMES.contains(&name)
}
