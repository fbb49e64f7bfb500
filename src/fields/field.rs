//! A single structured attribute.

use crate::fields::value::FieldValue;

/// One key/value pair attached to a log entry.
///
/// Keys are not validated. Duplicates are allowed and resolved by the
/// backend, where the last occurrence wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: String,
    value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn into_parts(self) -> (String, FieldValue) {
        (self.key, self.value)
    }
}

/// Build a [`Field`].
pub fn with_field(key: impl Into<String>, value: impl Into<FieldValue>) -> Field {
    Field::new(key, value)
}

/// Build a `Vec<Field>` from `key => value` pairs.
///
/// ```
/// use logbridge_core::fields;
///
/// let attrs = fields!["user" => "bob", "attempt" => 3i32];
/// assert_eq!(attrs.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    ($($key:expr => $value:expr),* $(,)?) => {
        vec![$($crate::with_field($key, $value)),*]
    };
}
