//! Request-scoped context.
//!
//! Carries the correlation id that context-aware log calls attach to every
//! entry. Values are looked up by key; the trace id lives under
//! [`TRACE_ID_KEY`].

use std::collections::HashMap;
use std::fmt;

use uuid::Uuid;

use crate::fields::{with_field, Field, FieldValue, TRACE_ID_KEY};

/// Values scoped to one request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    values: HashMap<String, FieldValue>,
}

impl RequestContext {
    /// An empty context.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn with_trace_id(self, trace_id: impl Into<String>) -> Self {
        self.with_value(TRACE_ID_KEY, trace_id.into())
    }

    /// Attach a freshly generated trace id.
    pub fn with_new_trace_id(self) -> Self {
        let trace_id = format!("trace-{}", Uuid::new_v4());
        self.with_trace_id(trace_id)
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn trace_id(&self) -> Option<&FieldValue> {
        self.value(TRACE_ID_KEY)
    }

    /// Trace id, or the [`FieldValue::Null`] sentinel when none is set.
    pub fn trace_value(&self) -> FieldValue {
        self.trace_id().cloned().unwrap_or(FieldValue::Null)
    }

    /// The field context-aware calls append.
    pub fn trace_field(&self) -> Field {
        with_field(TRACE_ID_KEY, self.trace_value())
    }
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.trace_id() {
            Some(tid) => write!(f, "[trace={}]", tid),
            None => write!(f, "[trace=-]"),
        }
    }
}
