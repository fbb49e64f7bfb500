//! Logger construction.
//!
//! [`new_logger`] is the zero-configuration entry point: it never fails and
//! never panics. [`build_logger`] takes a full [`LoggerConfig`] and lets the
//! caller choose between failing fast and degrading to an inert logger.

use crate::backends::{EnvLoggerBackend, InertLogger, LogDriver, SlogBackend, TracingBackend};
use crate::config::{InitFailurePolicy, LoggerConfig};
use crate::error::Result;
use crate::logging::{Level, Logger};

/// Build a stderr logger for `driver`.
///
/// Unknown driver names select [`LogDriver::EnvLogger`]. `use_global_instance`
/// only affects the `env_logger` backend, which then also becomes the
/// process-wide `log` logger. If the engine cannot be built, the returned
/// logger drops everything.
///
/// ```
/// use logbridge_core::{new_logger, with_field, LogDriver};
///
/// let logger = new_logger("slog", false);
/// logger.info("service started", &[with_field("port", 8080i32)]);
/// logger.sync();
/// assert_eq!(logger.driver(), LogDriver::Slog);
/// ```
pub fn new_logger(driver: impl Into<LogDriver>, use_global_instance: bool) -> Box<dyn Logger> {
    let config = LoggerConfig::new(driver)
        .with_global_instance(use_global_instance)
        .with_level(Level::Trace);

    match build_logger(&config) {
        Ok(logger) => logger,
        Err(_) => Box::new(InertLogger::new(config.driver)),
    }
}

/// Build the logger described by `config`.
///
/// Under [`InitFailurePolicy::Degrade`] this only returns `Ok`; failures
/// produce an [`InertLogger`] and one diagnostic line on stderr.
pub fn build_logger(config: &LoggerConfig) -> Result<Box<dyn Logger>> {
    match construct(config) {
        Ok(logger) => Ok(logger),
        Err(err) => match config.on_init_failure {
            InitFailurePolicy::FailFast => Err(err),
            InitFailurePolicy::Degrade => {
                eprintln!(
                    "logbridge: {} logger unavailable, entries will be dropped: {}",
                    config.driver, err
                );
                Ok(Box::new(InertLogger::new(config.driver)))
            }
        },
    }
}

fn construct(config: &LoggerConfig) -> Result<Box<dyn Logger>> {
    Ok(match config.driver {
        LogDriver::EnvLogger => Box::new(EnvLoggerBackend::new(config)?),
        LogDriver::Slog => Box::new(SlogBackend::new(config)?),
        LogDriver::Tracing => Box::new(TracingBackend::new(config)?),
    })
}
