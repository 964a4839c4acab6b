//! Source location of a logging call
//!
//! Use the [`caller!`](crate::caller) macro to capture the enclosing function,
//! file and line, then attach them to a logger under the reserved
//! `caller:func`, `caller:file` and `caller:line` names.

use super::field_names::{FIELD_NAME_CALLER_FILE, FIELD_NAME_CALLER_FUNC, FIELD_NAME_CALLER_LINE};
use super::fields::Fields;
use super::traits::StructuredLogger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub func: String,
    pub file: String,
    pub line: u32,
}

impl Caller {
    pub fn new(func: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            func: func.into(),
            file: file.into(),
            line,
        }
    }

    /// Location of the code calling this function; the function name is unknown
    #[track_caller]
    pub fn here() -> Self {
        let location = std::panic::Location::caller();
        Self::new("", location.file(), location.line())
    }

    /// The location as reserved fields; an empty function name is omitted
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new()
            .with(FIELD_NAME_CALLER_FILE, self.file.as_str())
            .with(FIELD_NAME_CALLER_LINE, self.line);
        if !self.func.is_empty() {
            fields.insert(FIELD_NAME_CALLER_FUNC, self.func.as_str());
        }
        fields
    }

    /// Derive a logger from any structured logger with the location attached
    pub fn attach(&self, logger: &dyn StructuredLogger) -> Box<dyn StructuredLogger> {
        let mut derived = logger
            .with_field(FIELD_NAME_CALLER_FILE, self.file.as_str().into())
            .with_field(FIELD_NAME_CALLER_LINE, self.line.into());
        if !self.func.is_empty() {
            derived = derived.with_field(FIELD_NAME_CALLER_FUNC, self.func.as_str().into());
        }
        derived
    }
}

#[doc(hidden)]
pub fn type_name_of<T>(_: T) -> &'static str {
    std::any::type_name::<T>()
}

/// Capture the enclosing function path, file and line as a [`Caller`]
///
/// ```
/// fn handler() -> logx::Caller {
///     logx::caller!()
/// }
///
/// let caller = handler();
/// assert!(caller.func.ends_with("::handler"));
/// assert!(caller.line > 0);
/// ```
#[macro_export]
macro_rules! caller {
    () => {{
        fn __logx_here() {}
        let name = $crate::core::caller::type_name_of(__logx_here);
        $crate::Caller::new(
            name.strip_suffix("::__logx_here").unwrap_or(name),
            file!(),
            line!(),
        )
    }};
}
