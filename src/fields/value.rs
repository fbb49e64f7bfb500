//! Field values.
//!
//! A closed set of scalar kinds plus an opaque JSON fallback. Conversions
//! happen once, at the `From` boundary, so adapters only ever match on
//! [`FieldValue`].

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

/// Value of one structured attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Absent value. Also the sentinel for a missing trace id.
    Null,
    Bool(bool),
    I32(i32),
    I64(i64),
    Isize(isize),
    Str(String),
    /// Anything without a dedicated kind, kept as JSON.
    Any(Value),
}

impl FieldValue {
    /// Capture any serializable value as an opaque field.
    ///
    /// Values that fail to serialize are logged as [`FieldValue::Null`].
    pub fn any<T: Serialize + ?Sized>(value: &T) -> Self {
        serde_json::to_value(value)
            .map(FieldValue::Any)
            .unwrap_or(FieldValue::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// JSON rendering shared by the formatters that need one.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::I32(n) => Value::from(*n),
            FieldValue::I64(n) => Value::from(*n),
            FieldValue::Isize(n) => Value::from(*n),
            FieldValue::Str(s) => Value::String(s.clone()),
            FieldValue::Any(v) => v.clone(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::I32(n) => write!(f, "{}", n),
            FieldValue::I64(n) => write!(f, "{}", n),
            FieldValue::Isize(n) => write!(f, "{}", n),
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Any(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::I32(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::I64(value)
    }
}

impl From<isize> for FieldValue {
    fn from(value: isize) -> Self {
        FieldValue::Isize(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Str(value.clone())
    }
}

impl From<Cow<'_, str>> for FieldValue {
    fn from(value: Cow<'_, str>) -> Self {
        FieldValue::Str(value.into_owned())
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Any(value)
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        FieldValue::Any(value.clone())
    }
}

macro_rules! opaque_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::Any(Value::from(value))
                }
            }
        )*
    };
}

opaque_from!(i8, i16, u8, u16, u32, u64, usize, f32, f64);

macro_rules! borrowed_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<&$ty> for FieldValue {
                fn from(value: &$ty) -> Self {
                    FieldValue::from(*value)
                }
            }
        )*
    };
}

borrowed_from!(bool, i32, i64, isize, i8, i16, u8, u16, u32, u64, usize, f32, f64);

// Pointer-like values log their pointee; an empty one is logged as-is.

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => FieldValue::Null,
        }
    }
}

impl<T: Into<FieldValue>> From<Box<T>> for FieldValue {
    fn from(value: Box<T>) -> Self {
        (*value).into()
    }
}

impl<T: Clone + Into<FieldValue>> From<Arc<T>> for FieldValue {
    fn from(value: Arc<T>) -> Self {
        T::clone(&value).into()
    }
}

impl<T: Clone + Into<FieldValue>> From<Rc<T>> for FieldValue {
    fn from(value: Rc<T>) -> Self {
        T::clone(&value).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_kinds() {
        assert_eq!(FieldValue::from(true), FieldValue::Bool(true));
        assert_eq!(FieldValue::from(7i32), FieldValue::I32(7));
        assert_eq!(FieldValue::from(7i64), FieldValue::I64(7));
        assert_eq!(FieldValue::from(7isize), FieldValue::Isize(7));
        assert_eq!(FieldValue::from("bob"), FieldValue::Str("bob".into()));
    }

    #[test]
    fn test_other_numbers_are_opaque() {
        assert_eq!(FieldValue::from(7u64), FieldValue::Any(json!(7)));
        assert_eq!(FieldValue::from(1.5f64), FieldValue::Any(json!(1.5)));
    }

    #[test]
    fn test_pointer_like_values_are_dereferenced() {
        assert_eq!(FieldValue::from(Some(3i32)), FieldValue::I32(3));
        assert_eq!(FieldValue::from(Box::new(false)), FieldValue::Bool(false));
        assert_eq!(
            FieldValue::from(Arc::new(String::from("x"))),
            FieldValue::Str("x".into())
        );
        assert_eq!(FieldValue::from(None::<i64>), FieldValue::Null);
    }

    #[test]
    fn test_references_keep_their_kind() {
        let n = 5i32;
        let big = 1i64 << 40;
        let name = String::from("bob");
        let peer = json!({"host": "db"});

        assert_eq!(FieldValue::from(&n), FieldValue::I32(5));
        assert_eq!(FieldValue::from(&big), FieldValue::I64(1 << 40));
        assert_eq!(FieldValue::from(&7isize), FieldValue::Isize(7));
        assert_eq!(FieldValue::from(&true), FieldValue::Bool(true));
        assert_eq!(FieldValue::from(&name), FieldValue::Str("bob".into()));
        assert_eq!(FieldValue::from(&3u64), FieldValue::Any(json!(3)));
        assert_eq!(FieldValue::from(&peer), FieldValue::Any(peer.clone()));
        assert_eq!(FieldValue::from(Some(&n)), FieldValue::I32(5));
    }

    #[test]
    fn test_any_serializes_structs() {
        #[derive(Serialize)]
        struct Peer {
            host: &'static str,
            port: u16,
        }

        let value = FieldValue::any(&Peer {
            host: "db",
            port: 5432,
        });
        assert_eq!(value, FieldValue::Any(json!({"host": "db", "port": 5432})));
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Null.to_string(), "null");
        assert_eq!(FieldValue::from("abc-123").to_string(), "abc-123");
        assert_eq!(FieldValue::from(json!([1, 2])).to_string(), "[1,2]");
    }

    #[test]
    fn test_to_json() {
        assert_eq!(FieldValue::from(42i32).to_json(), json!(42));
        assert_eq!(FieldValue::Null.to_json(), Value::Null);
        assert_eq!(FieldValue::from("s").to_json(), json!("s"));
    }
}
