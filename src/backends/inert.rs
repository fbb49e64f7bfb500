//! Logger that discards every entry.

use crate::backends::LogDriver;
use crate::fields::Field;
use crate::logging::{Level, Logger};

/// Stand-in for a backend whose engine could not be built.
///
/// Reports the driver that was asked for so callers can still tell which
/// configuration it came from.
#[derive(Debug, Clone, Copy)]
pub struct InertLogger {
    driver: LogDriver,
}

impl InertLogger {
    pub fn new(driver: LogDriver) -> Self {
        Self { driver }
    }
}

impl Logger for InertLogger {
    fn driver(&self) -> LogDriver {
        self.driver
    }

    fn sync(&self) {}

    #[inline]
    fn log(&self, _level: Level, _msg: &str, _fields: &[Field]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::RequestContext;

    #[test]
    fn test_inert_logger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InertLogger>();
    }

    #[test]
    fn test_inert_logger_as_trait_object() {
        let logger: Box<dyn Logger> = Box::new(InertLogger::new(LogDriver::Slog));
        logger.info("dropped", &[]);
        logger.err_with_ctx(&RequestContext::background(), "dropped", &[]);
        logger.sync();
        assert_eq!(logger.driver(), LogDriver::Slog);
    }
}
