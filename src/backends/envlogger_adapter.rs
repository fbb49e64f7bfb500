//! `log` + `env_logger` backend.
//!
//! Fields travel as `log` key/values and are turned into one JSON object
//! per line by the formatter installed on the `env_logger` builder. The
//! engine flushes its sink after every record.
//!
//! This is the only backend that can become the ambient logger: with
//! `use_global_instance` the engine is handed to `log::set_boxed_logger`
//! and every `log::info!` in the process goes through the same formatter.
//! Facade calls carry the `logbridge` target; plain `log` calls keep the
//! target of the module that made them.
//!
//! The global slot can be filled once. A later global request under
//! [`InitFailurePolicy::Degrade`] routes through the installed engine when
//! it is ours, or keeps a private engine when another logger holds it.

use std::io::{self, Write};

use chrono::Utc;
use env_logger::fmt::Formatter;
use log::kv::{self, Key, Source, Value, VisitSource};
use log::{LevelFilter, Log, Record};
use serde_json::{Map, Value as JsonValue};

use crate::backends::LogDriver;
use crate::config::{InitFailurePolicy, LoggerConfig};
use crate::error::Result;
use crate::fields::{
    Field, FieldValue, DRIVER_KEY, FATAL_KEY, LEVEL_KEY, MESSAGE_KEY, TIMESTAMP_KEY,
};
use crate::logging::{ambient, Level, Logger};
use crate::output::SinkWriter;

const TARGET: &str = "logbridge";
const TARGET_KEY: &str = "target";

enum Engine {
    Owned(env_logger::Logger),
    /// Installed through `log::set_boxed_logger`; reached via `log::logger()`.
    Ambient,
}

/// Backend emitting through `env_logger`.
pub struct EnvLoggerBackend {
    engine: Engine,
    sink: SinkWriter,
}

impl EnvLoggerBackend {
    pub fn new(config: &LoggerConfig) -> Result<Self> {
        let sink = config.output.open()?;

        if !config.use_global_instance {
            let engine = Engine::Owned(build_engine(config, &sink));
            return Ok(Self { engine, sink });
        }

        let logger = build_engine(config, &sink);
        let max_level = logger.filter();
        let engine = match ambient::install(LogDriver::EnvLogger, Box::new(logger), max_level) {
            Ok(()) => Engine::Ambient,
            Err(err) if config.on_init_failure == InitFailurePolicy::FailFast => return Err(err),
            Err(_) if ambient::ambient_driver() == Some(LogDriver::EnvLogger) => Engine::Ambient,
            Err(_) => Engine::Owned(build_engine(config, &sink)),
        };

        Ok(Self { engine, sink })
    }

    pub fn is_global(&self) -> bool {
        matches!(self.engine, Engine::Ambient)
    }

    fn dispatch(&self, record: &Record<'_>) {
        match &self.engine {
            Engine::Owned(logger) => logger.log(record),
            Engine::Ambient => log::logger().log(record),
        }
    }
}

impl Logger for EnvLoggerBackend {
    fn driver(&self) -> LogDriver {
        LogDriver::EnvLogger
    }

    fn sync(&self) {
        if let Engine::Ambient = self.engine {
            log::logger().flush();
        }
        let _ = self.sink.sync();
    }

    fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        let source = RecordFields {
            fields,
            fatal: level == Level::Fatal,
        };
        self.dispatch(
            &Record::builder()
                .args(format_args!("{}", msg))
                .level(log_level(level))
                .target(TARGET)
                .module_path_static(Some(module_path!()))
                .key_values(&source)
                .build(),
        );
    }
}

fn build_engine(config: &LoggerConfig, sink: &SinkWriter) -> env_logger::Logger {
    env_logger::Builder::new()
        .filter_level(level_filter(config.level))
        .target(env_logger::Target::Pipe(Box::new(sink.clone())))
        .format(format_entry)
        .build()
}

fn log_level(level: Level) -> log::Level {
    match level {
        Level::Trace => log::Level::Trace,
        Level::Debug => log::Level::Debug,
        Level::Info => log::Level::Info,
        Level::Warn => log::Level::Warn,
        Level::Error | Level::Fatal => log::Level::Error,
    }
}

fn level_filter(level: Level) -> LevelFilter {
    log_level(level).to_level_filter()
}

/// Typed translation of a field value into a `log` value.
fn to_log_value(value: &FieldValue) -> Value<'_> {
    match value {
        FieldValue::Null => Value::null(),
        FieldValue::Bool(b) => Value::from(*b),
        FieldValue::I32(n) => Value::from(*n),
        FieldValue::I64(n) => Value::from(*n),
        FieldValue::Isize(n) => Value::from(*n),
        FieldValue::Str(s) => Value::from(s.as_str()),
        FieldValue::Any(json) => Value::from_serde(json),
    }
}

/// Caller fields as a `log` key/value source.
struct RecordFields<'a> {
    fields: &'a [Field],
    fatal: bool,
}

impl Source for RecordFields<'_> {
    fn visit<'kvs>(
        &'kvs self,
        visitor: &mut dyn VisitSource<'kvs>,
    ) -> std::result::Result<(), kv::Error> {
        for field in self.fields {
            visitor.visit_pair(Key::from_str(field.key()), to_log_value(field.value()))?;
        }
        if self.fatal {
            visitor.visit_pair(Key::from_str(FATAL_KEY), Value::from(true))?;
        }
        Ok(())
    }
}

/// Collects key/values into a JSON map; later keys overwrite earlier ones.
struct JsonFields<'a>(&'a mut Map<String, JsonValue>);

impl<'kvs> VisitSource<'kvs> for JsonFields<'_> {
    fn visit_pair(
        &mut self,
        key: Key<'kvs>,
        value: Value<'kvs>,
    ) -> std::result::Result<(), kv::Error> {
        let json =
            serde_json::to_value(&value).unwrap_or_else(|_| JsonValue::String(value.to_string()));
        self.0.insert(key.as_str().to_string(), json);
        Ok(())
    }
}

fn epoch_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// `env_logger` format function: one JSON object per line.
///
/// Reserved keys are inserted after the record's key/values.
fn format_entry(buf: &mut Formatter, record: &Record<'_>) -> io::Result<()> {
    let mut entry = Map::new();
    record
        .key_values()
        .visit(&mut JsonFields(&mut entry))
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;

    entry.insert(
        LEVEL_KEY.to_string(),
        JsonValue::from(record.level().as_str().to_ascii_lowercase()),
    );
    entry.insert(TIMESTAMP_KEY.to_string(), JsonValue::from(epoch_seconds()));
    entry.insert(TARGET_KEY.to_string(), JsonValue::from(record.target()));
    entry.insert(
        MESSAGE_KEY.to_string(),
        JsonValue::from(record.args().to_string()),
    );
    entry.insert(
        DRIVER_KEY.to_string(),
        JsonValue::from(LogDriver::EnvLogger.as_str()),
    );

    serde_json::to_writer(&mut *buf, &entry)?;
    writeln!(buf)
}
