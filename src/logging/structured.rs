//! Structured logging macros.
//!
//! Shorthand for leveled calls with inline `key => value` fields:
//!
//! ```
//! use logbridge_core::{log_info, new_logger};
//!
//! let logger = new_logger("slog", false);
//! log_info!(logger, "BATCH_RECEIVED", "batch_id" => "b-1", "traces" => 12i32);
//! ```

/// Log an info message with fields.
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $logger.info($msg, &[$($crate::with_field($key, $value)),*])
    };
}

/// Log a warning message with fields.
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $logger.warn($msg, &[$($crate::with_field($key, $value)),*])
    };
}

/// Log an error message with fields.
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $logger.err($msg, &[$($crate::with_field($key, $value)),*])
    };
}

/// Log a debug message with fields.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $logger.debug($msg, &[$($crate::with_field($key, $value)),*])
    };
}

/// Log a trace message with fields.
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $logger.trace($msg, &[$($crate::with_field($key, $value)),*])
    };
}
