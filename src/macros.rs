//! Logging macros
//!
//! The contract methods take their arguments as `&[FieldValue]`. These macros
//! convert each argument with `FieldValue::from`, so call sites read like
//! ordinary print/printf calls and work on any [`StructuredLogger`](crate::StructuredLogger),
//! including trait objects.
//!
//! # Examples
//!
//! ```
//! use logx::prelude::*;
//! use logx::{info, infof};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder().sink(sink.clone()).build();
//!
//! info!(logger, "Server started");
//! infof!(logger, "Server listening on port %d", 8080);
//!
//! assert_eq!(sink.messages(), vec!["Server started", "Server listening on port 8080"]);
//! ```

/// Build a `[FieldValue; N]` from heterogeneous arguments.
#[doc(hidden)]
#[macro_export]
macro_rules! __logx_values {
    ($($arg:expr),* $(,)?) => {
        [$($crate::FieldValue::from($arg)),*]
    };
}

/// Build a [`Fields`](crate::Fields) mapping.
///
/// ```
/// let fields = logx::fields! { "user" => "alice", "attempt" => 3 };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    ($($name:expr => $value:expr),* $(,)?) => {
        $crate::Fields::new()$(.with($name, $value))*
    };
}

/// Log at an explicit severity; arguments are concatenated like `print`.
///
/// ```
/// # use logx::prelude::*;
/// # let logger = Logger::new();
/// logx::log!(logger, Severity::new(250), "between info and notice");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $($arg:expr),+ $(,)?) => {{
        use $crate::StructuredLogger as _;
        $logger.log($severity, &$crate::sprint(&$crate::__logx_values!($($arg),+)))
    }};
}

/// Log a debug message; arguments are concatenated like `print`.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:expr),+ $(,)?) => {{
        use $crate::StructuredLogger as _;
        $logger.debug(&$crate::__logx_values!($($arg),+))
    }};
}

/// Log an info message; arguments are concatenated like `print`.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:expr),+ $(,)?) => {{
        use $crate::StructuredLogger as _;
        $logger.info(&$crate::__logx_values!($($arg),+))
    }};
}

/// Log a notice message; arguments are concatenated like `print`.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:expr),+ $(,)?) => {{
        use $crate::StructuredLogger as _;
        $logger.notice(&$crate::__logx_values!($($arg),+))
    }};
}

/// Log a warning message; arguments are concatenated like `print`.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:expr),+ $(,)?) => {{
        use $crate::StructuredLogger as _;
        $logger.warning(&$crate::__logx_values!($($arg),+))
    }};
}

/// Log an error message; arguments are concatenated like `print`.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:expr),+ $(,)?) => {{
        use $crate::StructuredLogger as _;
        $logger.error(&$crate::__logx_values!($($arg),+))
    }};
}

/// Log a debug message from a printf-style template.
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::StructuredLogger as _;
        $logger.debugf($template, &$crate::__logx_values!($($arg),*))
    }};
}

/// Log an info message from a printf-style template.
///
/// ```
/// # use logx::prelude::*;
/// # let logger = Logger::new();
/// logx::infof!(logger, "count=%d items", 5);
/// ```
#[macro_export]
macro_rules! infof {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::StructuredLogger as _;
        $logger.infof($template, &$crate::__logx_values!($($arg),*))
    }};
}

/// Log a notice message from a printf-style template.
#[macro_export]
macro_rules! noticef {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::StructuredLogger as _;
        $logger.noticef($template, &$crate::__logx_values!($($arg),*))
    }};
}

/// Log a warning message from a printf-style template.
#[macro_export]
macro_rules! warningf {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::StructuredLogger as _;
        $logger.warningf($template, &$crate::__logx_values!($($arg),*))
    }};
}

/// Log an error message from a printf-style template.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::StructuredLogger as _;
        $logger.errorf($template, &$crate::__logx_values!($($arg),*))
    }};
}

/// Log at the print severity from a printf-style template.
#[macro_export]
macro_rules! printf {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::LogF as _;
        $logger.printf($template, &$crate::__logx_values!($($arg),*))
    }};
}

/// Log a fatal message from a printf-style template, then terminate.
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::LogF as _;
        $logger.fatalf($template, &$crate::__logx_values!($($arg),*))
    }};
}

/// Log a panic message from a printf-style template, then unwind.
#[macro_export]
macro_rules! panicf {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::LogF as _;
        $logger.panicf($template, &$crate::__logx_values!($($arg),*))
    }};
}
