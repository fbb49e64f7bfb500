//! Process-wide logger installation.
//!
//! The ambient logger is the one collaborators reach through the `log`
//! macros without holding a reference. It can be installed once per
//! process; `log::set_boxed_logger` enforces that, and this module records
//! which backend won.

use lazy_static::lazy_static;
use parking_lot::RwLock;

use crate::backends::LogDriver;
use crate::error::{LoggerError, Result};

lazy_static! {
    static ref AMBIENT_DRIVER: RwLock<Option<LogDriver>> = RwLock::new(None);
}

/// Driver installed as the ambient logger by this crate, if any.
pub fn ambient_driver() -> Option<LogDriver> {
    *AMBIENT_DRIVER.read()
}

/// Install `logger` as the process-wide `log` logger.
///
/// Fails with [`LoggerError::GlobalAlreadyInstalled`] if any logger, ours
/// or not, was installed before.
pub(crate) fn install(
    driver: LogDriver,
    logger: Box<dyn log::Log>,
    max_level: log::LevelFilter,
) -> Result<()> {
    let mut slot = AMBIENT_DRIVER.write();
    log::set_boxed_logger(logger).map_err(|_| LoggerError::GlobalAlreadyInstalled)?;
    log::set_max_level(max_level);
    *slot = Some(driver);
    Ok(())
}
