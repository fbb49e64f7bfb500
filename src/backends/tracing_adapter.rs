//! `tracing` + `tracing-subscriber` backend.
//!
//! Each backend owns a private [`Dispatch`] wrapping a JSON `fmt`
//! subscriber, entered only for the duration of one call, so it never
//! touches the process-wide default subscriber.
//!
//! `tracing` field names are fixed at compile time. The driver tag, trace
//! id and fatal marker are real fields; caller fields are rendered as one
//! JSON object text under `fields`. Error entries carry the message under
//! `error` instead of `message`.
//!
//! `filename` and `line_number` come from the event callsite, which is this
//! adapter rather than the facade caller.

use std::fmt;

use serde_json::{Map, Value};
use tracing::dispatcher::{self, Dispatch};
use tracing::field;

use crate::backends::LogDriver;
use crate::config::LoggerConfig;
use crate::error::Result;
use crate::fields::{Field, FieldValue};
use crate::logging::{Level, Logger, RequestContext};
use crate::output::SinkWriter;

/// Backend emitting through a private `tracing` dispatcher.
pub struct TracingBackend {
    dispatch: Dispatch,
    sink: SinkWriter,
}

impl TracingBackend {
    pub fn new(config: &LoggerConfig) -> Result<Self> {
        let sink = config.output.open()?;
        let writer = sink.clone();

        let subscriber = tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .with_max_level(max_level(config.level))
            .with_writer(move || writer.clone())
            .finish();

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            sink,
        })
    }

    fn emit(&self, level: Level, msg: &str, fields: &[Field], trace: Option<&FieldValue>) {
        let attrs = FieldsJson(fields);
        let trace_id = trace.map(field::display);

        dispatcher::with_default(&self.dispatch, || match level {
            Level::Trace => tracing::trace!(
                driver = LogDriver::Tracing.as_str(),
                trace_id,
                fields = %attrs,
                "{}",
                msg
            ),
            Level::Debug => tracing::debug!(
                driver = LogDriver::Tracing.as_str(),
                trace_id,
                fields = %attrs,
                "{}",
                msg
            ),
            Level::Info => tracing::info!(
                driver = LogDriver::Tracing.as_str(),
                trace_id,
                fields = %attrs,
                "{}",
                msg
            ),
            Level::Warn => tracing::warn!(
                driver = LogDriver::Tracing.as_str(),
                trace_id,
                fields = %attrs,
                "{}",
                msg
            ),
            Level::Error => tracing::error!(
                driver = LogDriver::Tracing.as_str(),
                trace_id,
                fields = %attrs,
                error = %msg
            ),
            Level::Fatal => tracing::error!(
                driver = LogDriver::Tracing.as_str(),
                trace_id,
                fields = %attrs,
                fatal = true,
                "{}",
                msg
            ),
        });
    }
}

impl Logger for TracingBackend {
    fn driver(&self) -> LogDriver {
        LogDriver::Tracing
    }

    fn sync(&self) {
        let _ = self.sink.sync();
    }

    fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        self.emit(level, msg, fields, None);
    }

    /// The trace id goes into its own `trace_id` field rather than the
    /// caller field object.
    fn log_with_ctx(&self, ctx: &RequestContext, level: Level, msg: &str, fields: &[Field]) {
        let trace = ctx.trace_value();
        self.emit(level, msg, fields, Some(&trace));
    }
}

fn max_level(level: Level) -> tracing::Level {
    match level {
        Level::Trace => tracing::Level::TRACE,
        Level::Debug => tracing::Level::DEBUG,
        Level::Info => tracing::Level::INFO,
        Level::Warn => tracing::Level::WARN,
        Level::Error | Level::Fatal => tracing::Level::ERROR,
    }
}

/// Caller fields rendered as a JSON object; later keys overwrite earlier ones.
struct FieldsJson<'a>(&'a [Field]);

impl fmt::Display for FieldsJson<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map: Map<String, Value> = self
            .0
            .iter()
            .map(|field| (field.key().to_string(), field.value().to_json()))
            .collect();
        write!(f, "{}", Value::Object(map))
    }
}
