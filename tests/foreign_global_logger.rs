//! Global requests when a logger from outside this crate already owns the
//! `log` slot. Own test binary: the slot is process-wide.

use log::{Log, Metadata, Record};
use logbridge_core::{
    ambient_driver, build_logger, LogDriver, LoggerConfig, LoggerError, SharedBuffer, DRIVER_KEY,
    MESSAGE_KEY,
};

struct Foreign;

impl Log for Foreign {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, _record: &Record<'_>) {}

    fn flush(&self) {}
}

#[test]
fn test_global_request_keeps_a_private_engine() -> anyhow::Result<()> {
    log::set_boxed_logger(Box::new(Foreign))?;
    log::set_max_level(log::LevelFilter::Trace);

    let config = LoggerConfig::new(LogDriver::EnvLogger).with_global_instance(true);

    let err = build_logger(&config.clone().with_buffer(SharedBuffer::new()).fail_fast()).err();
    assert!(matches!(err, Some(LoggerError::GlobalAlreadyInstalled)));
    assert_eq!(ambient_driver(), None);

    let buffer = SharedBuffer::new();
    let logger = build_logger(&config.with_buffer(buffer.clone()))?;
    logger.info("private", &[]);
    logger.sync();

    let records = buffer.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0][MESSAGE_KEY], "private");
    assert_eq!(records[0][DRIVER_KEY], "env_logger");
    assert_eq!(ambient_driver(), None);
    Ok(())
}
