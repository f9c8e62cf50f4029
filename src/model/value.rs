//! Universal value type stored in a property store.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};

use super::{AdditionalData, Model};

/// A dynamically typed property value.
///
/// Covers every kind a model field can hold:
/// - Scalars: Bool, Int32, Int64, Float32, Float64, String, Bytes
/// - Temporal: DateTime (offset-aware), Date, Time
/// - Containers: List, Model, Map (untyped additional data)
///
/// `Null` and "never set" are indistinguishable to readers of a store.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),

    // Temporal types
    DateTime(DateTime<FixedOffset>),
    Date(NaiveDate),
    Time(NaiveTime),

    // Containers
    List(Vec<Value>),
    Model(Box<dyn Model>),
    Map(AdditionalData),
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::DateTime(_) => "date-time",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::List(_) => "list",
            Value::Model(_) => "model",
            Value::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

    /// Attempt to borrow as &str
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempt to borrow as raw bytes
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Attempt to borrow as a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Attempt to borrow as a nested model
    pub fn as_model(&self) -> Option<&dyn Model> {
        match self {
            Value::Model(m) => Some(m.as_ref()),
            _ => None,
        }
    }

    /// Attempt to borrow as an untyped map
    pub fn as_map(&self) -> Option<&AdditionalData> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int32(v) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int64(v) } }
impl From<f32> for Value { fn from(v: f32) -> Self { Value::Float32(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float64(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<Vec<u8>> for Value { fn from(v: Vec<u8>) -> Self { Value::Bytes(v) } }
impl From<&[u8]> for Value { fn from(v: &[u8]) -> Self { Value::Bytes(v.to_vec()) } }
impl From<DateTime<FixedOffset>> for Value { fn from(v: DateTime<FixedOffset>) -> Self { Value::DateTime(v) } }
impl From<NaiveDate> for Value { fn from(v: NaiveDate) -> Self { Value::Date(v) } }
impl From<NaiveTime> for Value { fn from(v: NaiveTime) -> Self { Value::Time(v) } }
impl From<Box<dyn Model>> for Value { fn from(v: Box<dyn Model>) -> Self { Value::Model(v) } }
impl From<AdditionalData> for Value { fn from(v: AdditionalData) -> Self { Value::Map(v) } }
impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self { Value::List(v.into_iter().map(Value::String).collect()) }
}
impl From<Vec<Value>> for Value { fn from(v: Vec<Value>) -> Self { Value::List(v) } }
impl From<Vec<Box<dyn Model>>> for Value {
    fn from(v: Vec<Box<dyn Model>>) -> Self { Value::List(v.into_iter().map(Value::Model).collect()) }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}

// ============================================================================
// Extraction (FromValue)
// ============================================================================

/// Convert from a stored `Value` to an owned concrete type.
///
/// Returns `None` when the value holds a different kind. Integer widths
/// widen (`Int32` → `i64`) but never narrow.
pub trait FromValue: Sized {
    fn from_value(val: &Value) -> Option<Self>;
}

macro_rules! from_value_scalar {
    ($ty:ty, $($pat:pat => $out:expr),+ $(,)?) => {
        impl FromValue for $ty {
            fn from_value(val: &Value) -> Option<Self> {
                match val {
                    $($pat => Some($out),)+
                    _ => None,
                }
            }
        }
    };
}

from_value_scalar!(bool, Value::Bool(b) => *b);
from_value_scalar!(i32, Value::Int32(i) => *i);
from_value_scalar!(i64, Value::Int64(i) => *i, Value::Int32(i) => i64::from(*i));
from_value_scalar!(f32, Value::Float32(f) => *f);
from_value_scalar!(f64, Value::Float64(f) => *f, Value::Float32(f) => f64::from(*f));
from_value_scalar!(String, Value::String(s) => s.clone());
from_value_scalar!(Vec<u8>, Value::Bytes(b) => b.clone());
from_value_scalar!(DateTime<FixedOffset>, Value::DateTime(dt) => *dt);
from_value_scalar!(NaiveDate, Value::Date(d) => *d);
from_value_scalar!(NaiveTime, Value::Time(t) => *t);
from_value_scalar!(AdditionalData, Value::Map(m) => m.clone());

/// Null elements are skipped; any other mismatching element rejects the list.
impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(val: &Value) -> Option<Self> {
        match val {
            Value::List(items) => items
                .iter()
                .filter(|item| !item.is_null())
                .map(T::from_value)
                .collect(),
            _ => None,
        }
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int32(i) => write!(f, "{i}"),
            Value::Int64(i) => write!(f, "{i}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::Bytes(b) => write!(f, "<bytes[{}]>", b.len()),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::Date(d) => write!(f, "{d}"),
            Value::Time(t) => write!(f, "{t}"),
            Value::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Value::Model(m) => write!(f, "<{}>", m.descriptor().name),
            Value::Map(m) => write!(f, "{}", serde_json::Value::Object(m.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from() {
        assert_eq!(Value::from("hello"), Value::String("hello".into()));
        assert_eq!(Value::from(42), Value::Int32(42));
        assert_eq!(Value::from(42i64), Value::Int64(42));
        assert_eq!(Value::from(1.5), Value::Float64(1.5));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(None::<bool>), Value::Null);
    }

    #[test]
    fn test_from_value_widens_but_never_narrows() {
        assert_eq!(i64::from_value(&Value::Int32(7)), Some(7));
        assert_eq!(i32::from_value(&Value::Int64(7)), None);
        assert_eq!(f64::from_value(&Value::Float32(0.5)), Some(0.5));
        assert_eq!(String::from_value(&Value::Int32(1)), None);
    }

    #[test]
    fn test_list_extraction_skips_nulls() {
        let list = Value::List(vec![Value::from("a"), Value::Null, Value::from("b")]);
        assert_eq!(Vec::<String>::from_value(&list), Some(vec!["a".to_string(), "b".to_string()]));

        let mixed = Value::List(vec![Value::from("a"), Value::from(1)]);
        assert_eq!(Vec::<String>::from_value(&mixed), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::List(vec![Value::from(1), Value::from("x")]).to_string(), "[1, \"x\"]");
        assert_eq!(Value::Bytes(vec![1, 2, 3]).to_string(), "<bytes[3]>");
    }
}
