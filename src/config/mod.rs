//! Logger configuration.
//!
//! A [`LoggerConfig`] selects the backend and how it is built. It can be
//! assembled in code, deserialized with serde, or read from the
//! environment:
//!
//! | variable        | meaning                                   |
//! |-----------------|-------------------------------------------|
//! | `LOG_DRIVER`    | `env_logger`, `slog` or `tracing`         |
//! | `LOG_GLOBAL`    | install as the process-wide `log` logger  |
//! | `LOG_LEVEL`     | minimum level (`trace` .. `fatal`)        |
//! | `LOG_OUTPUT`    | `stderr`, `stdout` or `file:<path>`       |
//! | `LOG_FAIL_FAST` | return construction errors                |
//!
//! Unknown values never fail; they keep the default.

use serde::Deserialize;

use crate::backends::LogDriver;
use crate::logging::Level;
use crate::output::{LogOutput, SharedBuffer};

/// What to do when the engine cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitFailurePolicy {
    /// Return an inert logger that drops every entry.
    #[default]
    Degrade,
    /// Return the error to the caller.
    FailFast,
}

/// Backend selection and construction options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub driver: LogDriver,
    /// Only honoured by the `env_logger` backend.
    pub use_global_instance: bool,
    pub level: Level,
    pub output: LogOutput,
    pub on_init_failure: InitFailurePolicy,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            driver: LogDriver::default(),
            use_global_instance: false,
            level: Level::Info,
            output: LogOutput::Stderr,
            on_init_failure: InitFailurePolicy::Degrade,
        }
    }
}

impl LoggerConfig {
    pub fn new(driver: impl Into<LogDriver>) -> Self {
        Self {
            driver: driver.into(),
            ..Self::default()
        }
    }

    /// Read the `LOG_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(driver) = lookup("LOG_DRIVER") {
            config.driver = LogDriver::from(driver.as_str());
        }
        if let Some(global) = lookup("LOG_GLOBAL") {
            config.use_global_instance = parse_flag(&global);
        }
        if let Some(level) = lookup("LOG_LEVEL").as_deref().and_then(Level::parse) {
            config.level = level;
        }
        if let Some(output) = lookup("LOG_OUTPUT") {
            config.output = LogOutput::parse(&output);
        }
        if lookup("LOG_FAIL_FAST").is_some_and(|v| parse_flag(&v)) {
            config.on_init_failure = InitFailurePolicy::FailFast;
        }

        config
    }

    pub fn with_global_instance(mut self, enabled: bool) -> Self {
        self.use_global_instance = enabled;
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Capture output into `buffer`.
    pub fn with_buffer(self, buffer: SharedBuffer) -> Self {
        self.with_output(LogOutput::Buffer(buffer))
    }

    pub fn with_failure_policy(mut self, policy: InitFailurePolicy) -> Self {
        self.on_init_failure = policy;
        self
    }

    pub fn fail_fast(self) -> Self {
        self.with_failure_policy(InitFailurePolicy::FailFast)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
