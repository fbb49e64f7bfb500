//! Output sinks.
//!
//! Backends never open files or streams themselves. They receive a
//! [`SinkWriter`] built from the configured [`LogOutput`] and hand it to
//! their engine.

pub mod buffer;

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Deserialize;

use crate::error::{LoggerError, Result};

pub use buffer::SharedBuffer;

/// Where log entries are written.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "String")]
pub enum LogOutput {
    #[default]
    Stderr,
    Stdout,
    /// Append to a file, creating it if needed.
    File(PathBuf),
    /// Capture into memory.
    Buffer(SharedBuffer),
}

impl LogOutput {
    /// Parse `stderr`, `stdout` or `file:<path>`. Anything else is stderr.
    pub fn parse(value: &str) -> LogOutput {
        let value = value.trim();
        match value {
            "stdout" => LogOutput::Stdout,
            "stderr" => LogOutput::Stderr,
            _ => match value.strip_prefix("file:") {
                Some(path) if !path.is_empty() => LogOutput::File(PathBuf::from(path)),
                _ => LogOutput::Stderr,
            },
        }
    }

    /// Open the sink. Files are opened for append.
    pub fn open(&self) -> Result<SinkWriter> {
        let target: Box<dyn Write + Send> = match self {
            LogOutput::Stderr => Box::new(io::stderr()),
            LogOutput::Stdout => Box::new(io::stdout()),
            LogOutput::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| LoggerError::Output {
                        path: path.clone(),
                        source,
                    })?;
                Box::new(file)
            }
            LogOutput::Buffer(buffer) => Box::new(buffer.clone()),
        };

        Ok(SinkWriter::new(target))
    }
}

impl From<String> for LogOutput {
    fn from(value: String) -> Self {
        LogOutput::parse(&value)
    }
}

impl fmt::Display for LogOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogOutput::Stderr => f.write_str("stderr"),
            LogOutput::Stdout => f.write_str("stdout"),
            LogOutput::File(path) => write!(f, "file:{}", path.display()),
            LogOutput::Buffer(_) => f.write_str("buffer"),
        }
    }
}

/// Shared handle to an opened sink.
///
/// Clones write to the same target under one lock, so an engine can own a
/// clone while the adapter keeps another for [`flush`](Write::flush).
#[derive(Clone)]
pub struct SinkWriter {
    target: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl SinkWriter {
    fn new(target: Box<dyn Write + Send>) -> Self {
        Self {
            target: Arc::new(Mutex::new(target)),
        }
    }

    /// Flush through a shared handle.
    pub fn sync(&self) -> io::Result<()> {
        self.target.lock().flush()
    }
}

impl fmt::Debug for SinkWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkWriter").finish_non_exhaustive()
    }
}

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.target.lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.target.lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.target.lock().flush()
    }
}
