//! Logbridge Core - structured logging facade
//!
//! Application code logs through one [`Logger`] trait; the engine behind it
//! is picked by configuration. The crate prioritizes:
//!
//! 1. **Uniformity** - one field and level model for every engine
//! 2. **Availability** - logging calls never fail or panic
//! 3. **Delegation** - formatting, buffering and I/O stay in the engines
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `fields` - key/value field model and reserved keys
//! - `logging` - the `Logger` trait, levels, request context, macros
//! - `backends` - `env_logger`, `slog` and `tracing` adapters
//! - `config` - backend selection, from code, serde or the environment
//! - `output` - sinks the engines write to
//! - `factory` - logger construction
//!
//! ## Example
//!
//! ```
//! use logbridge_core::{new_logger, with_field, RequestContext};
//!
//! let logger = new_logger("tracing", false);
//! let ctx = RequestContext::background().with_trace_id("abc-123");
//!
//! logger.info_with_ctx(&ctx, "request served", &[with_field("status", 200i32)]);
//! logger.sync();
//! ```

pub mod backends;
pub mod config;
pub mod error;
pub mod factory;
pub mod fields;
pub mod logging;
pub mod output;

pub use backends::LogDriver;
pub use config::{InitFailurePolicy, LoggerConfig};
pub use error::LoggerError;
pub use factory::{build_logger, new_logger};
pub use fields::{with_field, Field, FieldValue, DRIVER_KEY, MESSAGE_KEY, TRACE_ID_KEY};
pub use logging::ambient::ambient_driver;
pub use logging::{Level, Logger, RequestContext};
pub use output::{LogOutput, SharedBuffer};
