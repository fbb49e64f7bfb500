//! Structured field model.
//!
//! Fields are plain key/value pairs. Backends translate them into their
//! engine's native attributes at emission time.

pub mod field;
pub mod value;

pub use field::{with_field, Field};
pub use value::FieldValue;

/// Key carrying the correlation id on context-aware calls.
pub const TRACE_ID_KEY: &str = "trace_id";
/// Key carrying the free-text message.
pub const MESSAGE_KEY: &str = "message";
/// Key naming the backend that produced an entry.
pub const DRIVER_KEY: &str = "driver";
/// Key carrying the emission time.
pub const TIMESTAMP_KEY: &str = "@timestamp";
/// Key carrying the message of `err` calls on backends that treat it as an error value.
pub const ERROR_KEY: &str = "error";
pub const LEVEL_KEY: &str = "level";
/// Marks entries emitted by `fatal` on engines without a fatal severity.
pub const FATAL_KEY: &str = "fatal";

/// Keys the backends write themselves. Caller fields never shadow them.
pub const RESERVED_KEYS: &[&str] = &[
    MESSAGE_KEY,
    DRIVER_KEY,
    TIMESTAMP_KEY,
    LEVEL_KEY,
    FATAL_KEY,
];

pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}
