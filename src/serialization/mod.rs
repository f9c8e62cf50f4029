//! # Serialization Contracts
//!
//! `ParseNode` and `SerializationWriter` are THE contract between the codec
//! layer and any wire format. The codec layer never touches JSON directly.
//!
//! ## Implementations
//!
//! | Format | Module | Description |
//! |--------|--------|-------------|
//! | JSON | `json_parse_node` | `JsonParseNode` over `serde_json::Value` |
//! | JSON | `json_writer` | `JsonSerializationWriter`, ordered tree builder |
//!
//! Text encodings shared by all formats live here: bytes are standard
//! base64, timestamps RFC 3339, dates `YYYY-MM-DD`, times `HH:MM:SS[.f]`.

pub mod json_parse_node;
pub mod json_writer;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat};

use crate::model::{AdditionalData, Model, Value};
use crate::{Error, Result};

pub use json_parse_node::JsonParseNode;
pub use json_writer::JsonSerializationWriter;

// ============================================================================
// ParseNode
// ============================================================================

/// One position in a decoded-but-untyped input tree.
///
/// Every typed getter returns `Ok(None)` for a wire `null`, and
/// `Error::MalformedValue` when the node holds a value of another shape.
pub trait ParseNode {
    /// Location of this node, for diagnostics (`$.manager.id`).
    fn path(&self) -> &str;

    fn is_null(&self) -> bool;

    /// Named child of an object node. `None` if absent or not an object.
    fn child_node(&self, name: &str) -> Option<Box<dyn ParseNode + '_>>;

    /// Members of an object node in input order; `None` for `null`.
    fn object_fields(&self) -> Result<Option<Vec<(&str, Box<dyn ParseNode + '_>)>>>;

    /// Elements of an array node; `None` for `null`.
    fn collection_items(&self) -> Result<Option<Vec<Box<dyn ParseNode + '_>>>>;

    fn get_bool_value(&self) -> Result<Option<bool>>;
    fn get_i32_value(&self) -> Result<Option<i32>>;
    fn get_i64_value(&self) -> Result<Option<i64>>;
    fn get_f32_value(&self) -> Result<Option<f32>>;
    fn get_f64_value(&self) -> Result<Option<f64>>;
    fn get_string_value(&self) -> Result<Option<String>>;

    /// The node verbatim, for fields no codec recognizes.
    fn untyped_value(&self) -> serde_json::Value;

    /// Whether unrecognized fields are kept in additional data.
    fn preserve_unknown_fields(&self) -> bool {
        true
    }

    fn get_bytes_value(&self) -> Result<Option<Vec<u8>>> {
        let Some(text) = self.get_string_value()? else { return Ok(None) };
        BASE64
            .decode(text.as_bytes())
            .map(Some)
            .map_err(|_| self.malformed("base64 bytes", "non-base64 string"))
    }

    fn get_date_time_value(&self) -> Result<Option<DateTime<FixedOffset>>> {
        let Some(text) = self.get_string_value()? else { return Ok(None) };
        DateTime::parse_from_rfc3339(&text)
            .map(Some)
            .map_err(|_| self.malformed("RFC 3339 date-time", &format!("\"{text}\"")))
    }

    fn get_date_value(&self) -> Result<Option<NaiveDate>> {
        let Some(text) = self.get_string_value()? else { return Ok(None) };
        NaiveDate::parse_from_str(&text, DATE_FORMAT)
            .map(Some)
            .map_err(|_| self.malformed("date (YYYY-MM-DD)", &format!("\"{text}\"")))
    }

    fn get_time_value(&self) -> Result<Option<NaiveTime>> {
        let Some(text) = self.get_string_value()? else { return Ok(None) };
        NaiveTime::parse_from_str(&text, TIME_FORMAT)
            .map(Some)
            .map_err(|_| self.malformed("time (HH:MM:SS)", &format!("\"{text}\"")))
    }

    fn malformed(&self, expected: &str, got: &str) -> Error {
        Error::MalformedValue {
            path: self.path().to_owned(),
            expected: expected.to_owned(),
            got: got.to_owned(),
        }
    }
}

// ============================================================================
// SerializationWriter
// ============================================================================

/// Output sink for model serialization.
///
/// `key` is `None` for array elements and the document root. Scalar
/// writers receive `None` for absent values; whether that becomes a wire
/// `null` or nothing at all is the writer's decision.
pub trait SerializationWriter {
    fn write_bool_value(&mut self, key: Option<&str>, value: Option<bool>) -> Result<()>;
    fn write_i32_value(&mut self, key: Option<&str>, value: Option<i32>) -> Result<()>;
    fn write_i64_value(&mut self, key: Option<&str>, value: Option<i64>) -> Result<()>;
    fn write_f32_value(&mut self, key: Option<&str>, value: Option<f32>) -> Result<()>;
    fn write_f64_value(&mut self, key: Option<&str>, value: Option<f64>) -> Result<()>;
    fn write_string_value(&mut self, key: Option<&str>, value: Option<&str>) -> Result<()>;
    fn write_null_value(&mut self, key: Option<&str>) -> Result<()>;
    fn write_untyped_value(&mut self, key: Option<&str>, value: &serde_json::Value) -> Result<()>;

    fn write_object_value(&mut self, key: Option<&str>, value: Option<&dyn Model>) -> Result<()>;

    /// Every element must be a `Value::Model` (or `Value::Null`).
    fn write_collection_of_object_values(&mut self, key: Option<&str>, values: &[Value]) -> Result<()>;

    fn write_collection_of_primitive_values(&mut self, key: Option<&str>, values: &[Value]) -> Result<()>;

    /// Consume the writer's content. Fails if an object or array is still open.
    fn flush(&mut self) -> Result<Vec<u8>>;

    fn write_bytes_value(&mut self, key: Option<&str>, value: Option<&[u8]>) -> Result<()> {
        let encoded = value.map(|bytes| BASE64.encode(bytes));
        self.write_string_value(key, encoded.as_deref())
    }

    fn write_date_time_value(&mut self, key: Option<&str>, value: Option<&DateTime<FixedOffset>>) -> Result<()> {
        let text = value.map(format_date_time);
        self.write_string_value(key, text.as_deref())
    }

    fn write_date_value(&mut self, key: Option<&str>, value: Option<NaiveDate>) -> Result<()> {
        let text = value.map(|date| date.format(DATE_FORMAT).to_string());
        self.write_string_value(key, text.as_deref())
    }

    fn write_time_value(&mut self, key: Option<&str>, value: Option<NaiveTime>) -> Result<()> {
        let text = value.map(|time| time.format(TIME_FORMAT).to_string());
        self.write_string_value(key, text.as_deref())
    }

    /// Dispatch on the value's own kind.
    fn write_primitive_value(&mut self, key: Option<&str>, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.write_null_value(key),
            Value::Bool(b) => self.write_bool_value(key, Some(*b)),
            Value::Int32(i) => self.write_i32_value(key, Some(*i)),
            Value::Int64(i) => self.write_i64_value(key, Some(*i)),
            Value::Float32(f) => self.write_f32_value(key, Some(*f)),
            Value::Float64(f) => self.write_f64_value(key, Some(*f)),
            Value::String(s) => self.write_string_value(key, Some(s)),
            Value::Bytes(b) => self.write_bytes_value(key, Some(b)),
            Value::DateTime(dt) => self.write_date_time_value(key, Some(dt)),
            Value::Date(d) => self.write_date_value(key, Some(*d)),
            Value::Time(t) => self.write_time_value(key, Some(*t)),
            Value::List(items) => self.write_collection_of_primitive_values(key, items),
            Value::Model(m) => self.write_object_value(key, Some(m.as_ref())),
            Value::Map(m) => self.write_untyped_value(key, &serde_json::Value::Object(m.clone())),
        }
    }

    fn write_additional_data(&mut self, data: &AdditionalData) -> Result<()> {
        for (key, value) in data {
            self.write_untyped_value(Some(key), value)?;
        }
        Ok(())
    }
}

// ============================================================================
// Shared text encodings
// ============================================================================

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// RFC 3339 with `Z` for UTC and only as many fractional digits as needed.
fn format_date_time(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// JSON type name of a raw value, for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_time_uses_z_for_utc() {
        let dt = DateTime::parse_from_rfc3339("2024-03-01T12:30:00+00:00").unwrap();
        assert_eq!(format_date_time(&dt), "2024-03-01T12:30:00Z");
    }

    #[test]
    fn test_format_date_time_keeps_offset_and_fraction() {
        let dt = DateTime::parse_from_rfc3339("2024-03-01T12:30:00.250+02:00").unwrap();
        assert_eq!(format_date_time(&dt), "2024-03-01T12:30:00.250+02:00");
    }

    #[test]
    fn test_json_type_name() {
        assert_eq!(json_type_name(&serde_json::json!(null)), "null");
        assert_eq!(json_type_name(&serde_json::json!([1])), "array");
        assert_eq!(json_type_name(&serde_json::json!({"a": 1})), "object");
    }
}
