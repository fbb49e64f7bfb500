//! Backend adapters.
//!
//! Each adapter wraps one logging engine:
//! - `env_logger` - the `log` facade with an `env_logger` JSON formatter (default)
//! - `slog` - `slog` with the `slog-json` drain
//! - `tracing` - `tracing` with the `tracing-subscriber` JSON formatter
//!
//! plus [`InertLogger`], which drops everything.

mod envlogger_adapter;
mod inert;
mod slog_adapter;
mod tracing_adapter;

use std::fmt;

use serde::Deserialize;

pub use envlogger_adapter::EnvLoggerBackend;
pub use inert::InertLogger;
pub use slog_adapter::SlogBackend;
pub use tracing_adapter::TracingBackend;

/// Identifies a backend. Also the value of the `driver` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum LogDriver {
    #[default]
    EnvLogger,
    Slog,
    Tracing,
}

impl LogDriver {
    pub const ALL: [LogDriver; 3] = [LogDriver::EnvLogger, LogDriver::Slog, LogDriver::Tracing];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogDriver::EnvLogger => "env_logger",
            LogDriver::Slog => "slog",
            LogDriver::Tracing => "tracing",
        }
    }
}

/// Unknown names select the default driver.
impl From<&str> for LogDriver {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "slog" => LogDriver::Slog,
            "tracing" => LogDriver::Tracing,
            _ => LogDriver::EnvLogger,
        }
    }
}

impl From<String> for LogDriver {
    fn from(name: String) -> Self {
        LogDriver::from(name.as_str())
    }
}

impl fmt::Display for LogDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
