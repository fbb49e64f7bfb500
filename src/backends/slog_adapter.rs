//! `slog` + `slog-json` backend.
//!
//! Field values are handed to slog through its own `Value` trait, so
//! slog-json decides how each kind is written. Nested values go through
//! `slog::Serde` and stay structured. Output goes straight to the sink
//! without buffering.

use std::sync::Mutex;

use chrono::Utc;
use slog::{
    BorrowedKV, Drain, Key, OwnedKV, Record, RecordLocation, RecordStatic, Serde, Serializer, KV,
};

use crate::backends::LogDriver;
use crate::config::LoggerConfig;
use crate::error::Result;
use crate::fields::{
    is_reserved, Field, FieldValue, DRIVER_KEY, LEVEL_KEY, MESSAGE_KEY, TIMESTAMP_KEY,
};
use crate::logging::{Level, Logger};
use crate::output::SinkWriter;

static LOCATION: RecordLocation = RecordLocation {
    file: file!(),
    line: line!(),
    column: column!(),
    function: "",
    module: module_path!(),
};

/// Backend emitting through a `slog::Logger` with a JSON drain.
pub struct SlogBackend {
    logger: slog::Logger,
    sink: SinkWriter,
}

impl SlogBackend {
    pub fn new(config: &LoggerConfig) -> Result<Self> {
        let sink = config.output.open()?;

        let json = slog_json::Json::new(sink.clone())
            .set_newlines(true)
            .add_key_value(OwnedKV(EntryHeader))
            .build();
        let drain = Mutex::new(json)
            .filter_level(slog_level(config.level))
            .ignore_res();
        let logger = slog::Logger::root(drain, OwnedKV(DriverTag));

        Ok(Self { logger, sink })
    }
}

impl Logger for SlogBackend {
    fn driver(&self) -> LogDriver {
        LogDriver::Slog
    }

    fn sync(&self) {
        let _ = self.sink.sync();
    }

    fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        let record_static = RecordStatic {
            location: &LOCATION,
            tag: "",
            level: slog_level(level),
        };
        let kv = RecordFields(fields);
        self.logger.log(&Record::new(
            &record_static,
            &format_args!("{}", msg),
            BorrowedKV(&kv),
        ));
    }
}

fn slog_level(level: Level) -> slog::Level {
    match level {
        Level::Trace => slog::Level::Trace,
        Level::Debug => slog::Level::Debug,
        Level::Info => slog::Level::Info,
        Level::Warn => slog::Level::Warning,
        Level::Error => slog::Level::Error,
        Level::Fatal => slog::Level::Critical,
    }
}

fn level_name(level: slog::Level) -> &'static str {
    match level {
        slog::Level::Trace => "trace",
        slog::Level::Debug => "debug",
        slog::Level::Info => "info",
        slog::Level::Warning => "warn",
        slog::Level::Error => "error",
        slog::Level::Critical => "fatal",
    }
}

/// Timestamp, level and message, written ahead of every entry.
struct EntryHeader;

impl KV for EntryHeader {
    fn serialize(&self, record: &Record<'_>, serializer: &mut dyn Serializer) -> slog::Result {
        serializer.emit_i64(Key::from(TIMESTAMP_KEY), Utc::now().timestamp())?;
        serializer.emit_str(Key::from(LEVEL_KEY), level_name(record.level()))?;
        serializer.emit_arguments(Key::from(MESSAGE_KEY), record.msg())
    }
}

struct DriverTag;

impl KV for DriverTag {
    fn serialize(&self, _record: &Record<'_>, serializer: &mut dyn Serializer) -> slog::Result {
        serializer.emit_str(Key::from(DRIVER_KEY), LogDriver::Slog.as_str())
    }
}

/// Caller fields. Reserved keys are skipped so they cannot shadow the
/// header or the driver tag. slog-json writes every pair it is given, so
/// only the last occurrence of a key is emitted.
struct RecordFields<'a>(&'a [Field]);

impl KV for RecordFields<'_> {
    fn serialize(&self, record: &Record<'_>, serializer: &mut dyn Serializer) -> slog::Result {
        for (i, field) in self.0.iter().enumerate() {
            let key = field.key();
            if is_reserved(key) || self.0[i + 1..].iter().any(|later| later.key() == key) {
                continue;
            }
            slog::Value::serialize(
                field.value(),
                record,
                Key::from(field.key().to_string()),
                serializer,
            )?;
        }
        Ok(())
    }
}

impl slog::Value for FieldValue {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> slog::Result {
        match self {
            FieldValue::Null => serializer.emit_none(key),
            FieldValue::Bool(b) => serializer.emit_bool(key, *b),
            FieldValue::I32(n) => serializer.emit_i32(key, *n),
            FieldValue::I64(n) => serializer.emit_i64(key, *n),
            FieldValue::Isize(n) => serializer.emit_isize(key, *n),
            FieldValue::Str(s) => serializer.emit_str(key, s),
            FieldValue::Any(json) => emit_json(key, json, serializer),
        }
    }
}

fn emit_json(key: Key, json: &serde_json::Value, serializer: &mut dyn Serializer) -> slog::Result {
    use serde_json::Value;

    match json {
        Value::Null => serializer.emit_none(key),
        Value::Bool(b) => serializer.emit_bool(key, *b),
        Value::String(s) => serializer.emit_str(key, s),
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                serializer.emit_i64(key, v)
            } else if let Some(v) = n.as_u64() {
                serializer.emit_u64(key, v)
            } else {
                serializer.emit_f64(key, n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::Array(_) | Value::Object(_) => serializer.emit_serde(key, &Serde(json.clone())),
    }
}
