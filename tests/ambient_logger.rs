//! Process-wide installation. Kept in its own test binary because the
//! `log` logger can only be set once per process.

use logbridge_core::{
    ambient_driver, build_logger, new_logger, with_field, Level, LogDriver, LoggerConfig,
    LoggerError, SharedBuffer, DRIVER_KEY, MESSAGE_KEY,
};

#[test]
fn test_global_instance_is_installed_once() -> anyhow::Result<()> {
    assert_eq!(ambient_driver(), None);

    let buffer = SharedBuffer::new();
    let logger = build_logger(
        &LoggerConfig::new(LogDriver::EnvLogger)
            .with_global_instance(true)
            .with_level(Level::Debug)
            .with_buffer(buffer.clone())
            .fail_fast(),
    )?;
    assert_eq!(ambient_driver(), Some(LogDriver::EnvLogger));

    // A collaborator that never saw the logger.
    log::info!(target: "billing", "invoice sent");
    log::trace!("below the configured level");
    logger.warn("direct", &[with_field("n", 1i32)]);
    logger.sync();

    let records = buffer.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0][MESSAGE_KEY], "invoice sent");
    assert_eq!(records[0]["target"], "billing");
    assert_eq!(records[0][DRIVER_KEY], "env_logger");
    assert_eq!(records[1][MESSAGE_KEY], "direct");
    assert_eq!(records[1]["n"], 1);

    let second = LoggerConfig::new(LogDriver::EnvLogger)
        .with_global_instance(true)
        .with_buffer(SharedBuffer::new());

    let err = build_logger(&second.clone().fail_fast()).err();
    assert!(matches!(err, Some(LoggerError::GlobalAlreadyInstalled)));

    // Later global requests share the installed engine and its output.
    let shared = build_logger(&second)?;
    assert_eq!(shared.driver(), LogDriver::EnvLogger);
    shared.info("second direct", &[with_field("n", 2i32)]);
    new_logger("env_logger", true).warn("third direct", &[]);
    shared.sync();

    let records = buffer.records();
    assert_eq!(records.len(), 4);
    assert_eq!(records[2][MESSAGE_KEY], "second direct");
    assert_eq!(records[2]["n"], 2);
    assert_eq!(records[3][MESSAGE_KEY], "third direct");

    // Other backends ignore the flag.
    let slog_buffer = SharedBuffer::new();
    let slog = build_logger(
        &LoggerConfig::new(LogDriver::Slog)
            .with_global_instance(true)
            .with_buffer(slog_buffer.clone())
            .fail_fast(),
    )?;
    slog.info("still works", &[]);
    assert_eq!(slog_buffer.records()[0][DRIVER_KEY], "slog");
    assert_eq!(ambient_driver(), Some(LogDriver::EnvLogger));

    Ok(())
}
