//! Behaviour every backend must share, exercised through the public API.

use logbridge_core::{
    build_logger, log_warn, with_field, Level, LogDriver, Logger, LoggerConfig, RequestContext,
    SharedBuffer, DRIVER_KEY, MESSAGE_KEY, TRACE_ID_KEY,
};
use serde_json::Value;

fn capture(driver: impl Into<LogDriver>) -> anyhow::Result<(Box<dyn Logger>, SharedBuffer)> {
    let buffer = SharedBuffer::new();
    let config = LoggerConfig::new(driver)
        .with_level(Level::Trace)
        .with_buffer(buffer.clone())
        .fail_fast();
    Ok((build_logger(&config)?, buffer))
}

fn emitted(logger: &dyn Logger, buffer: &SharedBuffer) -> Vec<Value> {
    logger.sync();
    buffer.records()
}

#[test]
fn test_each_call_emits_exactly_one_tagged_record() -> anyhow::Result<()> {
    for driver in LogDriver::ALL {
        let (logger, buffer) = capture(driver)?;
        let fields: Vec<_> = (0..4).map(|i| with_field(format!("f{}", i), i)).collect();

        logger.info("one", &fields);
        let records = emitted(logger.as_ref(), &buffer);
        assert_eq!(records.len(), 1, "driver {}", driver);
        assert_eq!(records[0][DRIVER_KEY], driver.as_str());

        buffer.clear();
        logger.debug("two", &[]);
        logger.trace("three", &fields[..1]);
        assert_eq!(emitted(logger.as_ref(), &buffer).len(), 2, "driver {}", driver);
    }
    Ok(())
}

#[test]
fn test_unknown_driver_emits_as_default() -> anyhow::Result<()> {
    let (logger, buffer) = capture("logrus")?;
    logger.info("hello", &[]);

    let records = emitted(logger.as_ref(), &buffer);
    assert_eq!(records[0][DRIVER_KEY], LogDriver::default().as_str());
    Ok(())
}

#[test]
fn test_ctx_carries_trace_id() -> anyhow::Result<()> {
    let ctx = RequestContext::background().with_trace_id("abc-123");

    for driver in LogDriver::ALL {
        let (logger, buffer) = capture(driver)?;
        logger.info_with_ctx(&ctx, "traced", &[]);
        logger.warn_with_ctx(&RequestContext::background(), "untraced", &[]);

        let records = emitted(logger.as_ref(), &buffer);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0][TRACE_ID_KEY], "abc-123", "driver {}", driver);
        assert!(records[1].get(TRACE_ID_KEY).is_some(), "driver {}", driver);
    }
    Ok(())
}

#[test]
fn test_caller_fields_survive_ctx_calls() -> anyhow::Result<()> {
    let (logger, buffer) = capture(LogDriver::EnvLogger)?;
    let ctx = RequestContext::background().with_new_trace_id();
    let fields = vec![with_field("user", "bob")];

    logger.debug_with_ctx(&ctx, "lookup", &fields);

    assert_eq!(fields, vec![with_field("user", "bob")]);
    let records = emitted(logger.as_ref(), &buffer);
    assert_eq!(records[0]["user"], "bob");
    assert_eq!(
        records[0][TRACE_ID_KEY].as_str(),
        ctx.trace_value().as_str()
    );
    Ok(())
}

#[test]
fn test_sync_before_any_logging() -> anyhow::Result<()> {
    for driver in LogDriver::ALL {
        let (logger, buffer) = capture(driver)?;
        logger.sync();
        logger.sync();
        assert!(buffer.is_empty());
    }
    Ok(())
}

#[test]
fn test_err_message_placement() -> anyhow::Result<()> {
    let (logger, buffer) = capture(LogDriver::Tracing)?;
    logger.err("boom", &[]);
    let record = &emitted(logger.as_ref(), &buffer)[0];
    assert_eq!(record["error"], "boom");

    for driver in [LogDriver::EnvLogger, LogDriver::Slog] {
        let (logger, buffer) = capture(driver)?;
        logger.err("boom", &[]);
        let record = &emitted(logger.as_ref(), &buffer)[0];
        assert_eq!(record[MESSAGE_KEY], "boom", "driver {}", driver);
        assert_eq!(record["level"], "error", "driver {}", driver);
    }
    Ok(())
}

#[test]
fn test_shared_across_threads() -> anyhow::Result<()> {
    use std::sync::Arc;

    for driver in LogDriver::ALL {
        let (logger, buffer) = capture(driver)?;
        let logger: Arc<dyn Logger> = Arc::from(logger);

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || {
                    for n in 0..25 {
                        log_warn!(logger, "tick", "worker" => worker, "n" => n);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker panicked");
        }

        assert_eq!(emitted(logger.as_ref(), &buffer).len(), 100, "driver {}", driver);
    }
    Ok(())
}
