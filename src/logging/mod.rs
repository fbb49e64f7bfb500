//! Logger interface.
//!
//! [`Logger`] is the facade every backend implements. Callers hold a
//! `Box<dyn Logger>` (or `Arc<dyn Logger>`) and never touch an engine API
//! directly.
//!
//! - `context` - request-scoped values, including the trace id
//! - `structured` - `log_*!` convenience macros
//! - `ambient` - record of the process-wide logger installation

pub mod ambient;
pub mod context;
pub mod structured;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::backends::LogDriver;
use crate::fields::Field;

pub use context::RequestContext;

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    #[serde(alias = "warning")]
    Warn,
    #[serde(alias = "err")]
    Error,
    Fatal,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }

    /// Parse a level name, case-insensitively.
    pub fn parse(name: &str) -> Option<Level> {
        match name.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" | "err" => Some(Level::Error),
            "fatal" => Some(Level::Fatal),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leveled, structured logging.
///
/// Implementations wrap exactly one engine handle and must be
/// `Send + Sync`; thread safety comes from the wrapped engine.
///
/// Only [`driver`](Logger::driver), [`sync`](Logger::sync) and
/// [`log`](Logger::log) are required. Every leveled method delegates to
/// `log`, and every `*_with_ctx` method to [`log_with_ctx`](Logger::log_with_ctx).
///
/// None of the methods return errors. A failing sink loses entries
/// silently; only [`fatal`](Logger::fatal) ends the process.
pub trait Logger: Send + Sync {
    /// Backend that produced this logger.
    fn driver(&self) -> LogDriver;

    /// Flush buffered output. A no-op for unbuffered backends.
    fn sync(&self);

    /// Emit one entry.
    ///
    /// `Level::Fatal` is emitted at fatal severity but does not exit; use
    /// [`fatal`](Logger::fatal) for that.
    fn log(&self, level: Level, msg: &str, fields: &[Field]);

    /// Emit one entry carrying the trace id found in `ctx`.
    fn log_with_ctx(&self, ctx: &RequestContext, level: Level, msg: &str, fields: &[Field]) {
        let mut scoped = Vec::with_capacity(fields.len() + 1);
        scoped.extend_from_slice(fields);
        scoped.push(ctx.trace_field());
        self.log(level, msg, &scoped);
    }

    fn trace(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Trace, msg, fields);
    }

    fn debug(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Debug, msg, fields);
    }

    fn info(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Info, msg, fields);
    }

    fn warn(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Warn, msg, fields);
    }

    /// Log at error level.
    ///
    /// Where the message lands is backend-specific: the tracing backend
    /// records it under the `error` key instead of `message`.
    fn err(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Error, msg, fields);
    }

    /// Log at fatal level, flush, and exit the process with status 1.
    fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        self.log(Level::Fatal, msg, fields);
        self.sync();
        std::process::exit(1)
    }

    fn trace_with_ctx(&self, ctx: &RequestContext, msg: &str, fields: &[Field]) {
        self.log_with_ctx(ctx, Level::Trace, msg, fields);
    }

    fn debug_with_ctx(&self, ctx: &RequestContext, msg: &str, fields: &[Field]) {
        self.log_with_ctx(ctx, Level::Debug, msg, fields);
    }

    fn info_with_ctx(&self, ctx: &RequestContext, msg: &str, fields: &[Field]) {
        self.log_with_ctx(ctx, Level::Info, msg, fields);
    }

    fn warn_with_ctx(&self, ctx: &RequestContext, msg: &str, fields: &[Field]) {
        self.log_with_ctx(ctx, Level::Warn, msg, fields);
    }

    fn err_with_ctx(&self, ctx: &RequestContext, msg: &str, fields: &[Field]) {
        self.log_with_ctx(ctx, Level::Error, msg, fields);
    }

    fn fatal_with_ctx(&self, ctx: &RequestContext, msg: &str, fields: &[Field]) -> ! {
        self.log_with_ctx(ctx, Level::Fatal, msg, fields);
        self.sync();
        std::process::exit(1)
    }
}
