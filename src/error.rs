//! Errors raised while constructing a logger.
//!
//! Logging calls themselves never fail. These only surface through
//! [`build_logger`](crate::build_logger) under
//! [`InitFailurePolicy::FailFast`](crate::config::InitFailurePolicy).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Logger construction failure.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// The configured output could not be opened.
    #[error("failed to open log output {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A process-wide `log` logger is already installed.
    #[error("a global logger is already installed")]
    GlobalAlreadyInstalled,
}

pub type Result<T> = std::result::Result<T, LoggerError>;
