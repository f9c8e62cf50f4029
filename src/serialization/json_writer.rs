//! JSON serialization writer.
//!
//! Builds an insertion-ordered `serde_json::Value` tree with an explicit
//! frame stack, then renders it on `flush()`. Field order in the output is
//! exactly the order the serializer wrote it.

use serde_json::{Map, Number, Value as JsonValue};

use super::SerializationWriter;
use crate::config::JsonConfig;
use crate::model::{Model, Value};
use crate::{Error, Result};

#[derive(Debug)]
enum Frame {
    Object(Map<String, JsonValue>),
    Array(Vec<JsonValue>),
}

/// Writer producing a single JSON document.
#[derive(Debug, Default)]
pub struct JsonSerializationWriter {
    config: JsonConfig,
    stack: Vec<Frame>,
    root: Option<JsonValue>,
}

impl JsonSerializationWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: JsonConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// Attach a finished value to the innermost open container, or make it
    /// the document root.
    fn emit(&mut self, key: Option<&str>, value: JsonValue) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Object(map)) => {
                let key = key.ok_or_else(|| {
                    Error::SerializationError("object member written without a key".into())
                })?;
                map.insert(key.to_owned(), value);
            }
            Some(Frame::Array(items)) => items.push(value),
            None => {
                if self.root.is_some() {
                    return Err(Error::SerializationError("document already has a root value".into()));
                }
                self.root = Some(value);
            }
        }
        Ok(())
    }

    /// Absent scalars are omitted unless the config asks for explicit nulls.
    fn emit_absent(&mut self, key: Option<&str>) -> Result<()> {
        if self.config.write_nulls {
            self.emit(key, JsonValue::Null)
        } else {
            Ok(())
        }
    }

    fn emit_float(&mut self, key: Option<&str>, value: f64) -> Result<()> {
        let number = Number::from_f64(value).ok_or_else(|| {
            Error::SerializationError(format!(
                "non-finite float {value} for `{}`",
                key.unwrap_or("<element>")
            ))
        })?;
        self.emit(key, JsonValue::Number(number))
    }

    fn close_object(&mut self) -> Result<Map<String, JsonValue>> {
        match self.stack.pop() {
            Some(Frame::Object(map)) => Ok(map),
            _ => Err(Error::SerializationError("unbalanced object frame".into())),
        }
    }

    fn close_array(&mut self) -> Result<Vec<JsonValue>> {
        match self.stack.pop() {
            Some(Frame::Array(items)) => Ok(items),
            _ => Err(Error::SerializationError("unbalanced array frame".into())),
        }
    }
}

impl SerializationWriter for JsonSerializationWriter {
    fn write_bool_value(&mut self, key: Option<&str>, value: Option<bool>) -> Result<()> {
        match value {
            Some(b) => self.emit(key, JsonValue::Bool(b)),
            None => self.emit_absent(key),
        }
    }

    fn write_i32_value(&mut self, key: Option<&str>, value: Option<i32>) -> Result<()> {
        match value {
            Some(i) => self.emit(key, JsonValue::from(i)),
            None => self.emit_absent(key),
        }
    }

    fn write_i64_value(&mut self, key: Option<&str>, value: Option<i64>) -> Result<()> {
        match value {
            Some(i) => self.emit(key, JsonValue::from(i)),
            None => self.emit_absent(key),
        }
    }

    fn write_f32_value(&mut self, key: Option<&str>, value: Option<f32>) -> Result<()> {
        match value {
            // Widen through the shortest decimal form so 0.1f32 renders as 0.1.
            Some(f) => {
                let wide = f.to_string().parse::<f64>().unwrap_or(f64::from(f));
                self.emit_float(key, wide)
            }
            None => self.emit_absent(key),
        }
    }

    fn write_f64_value(&mut self, key: Option<&str>, value: Option<f64>) -> Result<()> {
        match value {
            Some(f) => self.emit_float(key, f),
            None => self.emit_absent(key),
        }
    }

    fn write_string_value(&mut self, key: Option<&str>, value: Option<&str>) -> Result<()> {
        match value {
            Some(s) => self.emit(key, JsonValue::String(s.to_owned())),
            None => self.emit_absent(key),
        }
    }

    fn write_null_value(&mut self, key: Option<&str>) -> Result<()> {
        self.emit(key, JsonValue::Null)
    }

    fn write_untyped_value(&mut self, key: Option<&str>, value: &JsonValue) -> Result<()> {
        self.emit(key, value.clone())
    }

    fn write_object_value(&mut self, key: Option<&str>, value: Option<&dyn Model>) -> Result<()> {
        let Some(model) = value else { return self.emit_absent(key) };
        self.stack.push(Frame::Object(Map::new()));
        crate::codec::serialize(model, self)?;
        let map = self.close_object()?;
        self.emit(key, JsonValue::Object(map))
    }

    fn write_collection_of_object_values(&mut self, key: Option<&str>, values: &[Value]) -> Result<()> {
        self.stack.push(Frame::Array(Vec::with_capacity(values.len())));
        for value in values {
            match value {
                Value::Model(model) => self.write_object_value(None, Some(model.as_ref()))?,
                Value::Null => self.write_null_value(None)?,
                other => {
                    return Err(Error::TypeError {
                        expected: "model".into(),
                        got: other.type_name().into(),
                    });
                }
            }
        }
        let items = self.close_array()?;
        self.emit(key, JsonValue::Array(items))
    }

    fn write_collection_of_primitive_values(&mut self, key: Option<&str>, values: &[Value]) -> Result<()> {
        self.stack.push(Frame::Array(Vec::with_capacity(values.len())));
        for value in values {
            self.write_primitive_value(None, value)?;
        }
        let items = self.close_array()?;
        self.emit(key, JsonValue::Array(items))
    }

    fn flush(&mut self) -> Result<Vec<u8>> {
        if !self.stack.is_empty() {
            return Err(Error::SerializationError(format!(
                "{} container(s) still open at flush",
                self.stack.len()
            )));
        }
        let Some(root) = self.root.take() else { return Ok(Vec::new()) };
        let bytes = if self.config.pretty {
            serde_json::to_vec_pretty(&root)?
        } else {
            serde_json::to_vec(&root)?
        };
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flushed(mut writer: JsonSerializationWriter) -> String {
        String::from_utf8(writer.flush().unwrap()).unwrap()
    }

    #[test]
    fn test_primitive_collection() {
        let mut writer = JsonSerializationWriter::new();
        let values = vec![Value::from(1), Value::from("two"), Value::Null, Value::from(true)];
        writer.write_collection_of_primitive_values(None, &values).unwrap();
        assert_eq!(flushed(writer), r#"[1,"two",null,true]"#);
    }

    #[test]
    fn test_empty_collection_is_written() {
        let mut writer = JsonSerializationWriter::new();
        writer.write_collection_of_primitive_values(None, &[]).unwrap();
        assert_eq!(flushed(writer), "[]");
    }

    #[test]
    fn test_absent_scalar_omitted_or_null() {
        let mut writer = JsonSerializationWriter::new();
        writer.write_string_value(None, None).unwrap();
        assert_eq!(flushed(writer), "");

        let config = JsonConfig { write_nulls: true, ..JsonConfig::default() };
        let mut writer = JsonSerializationWriter::with_config(config);
        writer.write_string_value(None, None).unwrap();
        assert_eq!(flushed(writer), "null");
    }

    #[test]
    fn test_float_rendering() {
        let mut writer = JsonSerializationWriter::new();
        writer.write_f32_value(None, Some(0.1)).unwrap();
        assert_eq!(flushed(writer), "0.1");

        let mut writer = JsonSerializationWriter::new();
        assert!(writer.write_f64_value(None, Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_second_root_is_rejected() {
        let mut writer = JsonSerializationWriter::new();
        writer.write_bool_value(None, Some(true)).unwrap();
        assert!(writer.write_bool_value(None, Some(false)).is_err());
    }

    #[test]
    fn test_bytes_are_base64() {
        let mut writer = JsonSerializationWriter::new();
        writer.write_bytes_value(None, Some(&[1, 2, 3])).unwrap();
        assert_eq!(flushed(writer), r#""AQID""#);
    }

    #[test]
    fn test_additional_data_keeps_insertion_order() {
        let mut data = crate::model::AdditionalData::new();
        data.insert("zeta".into(), serde_json::json!(1));
        data.insert("alpha".into(), serde_json::json!({"nested": [true]}));

        let mut writer = JsonSerializationWriter::new();
        writer.stack.push(Frame::Object(Map::new()));
        writer.write_additional_data(&data).unwrap();
        let map = writer.close_object().unwrap();
        writer.emit(None, JsonValue::Object(map)).unwrap();
        assert_eq!(flushed(writer), r#"{"zeta":1,"alpha":{"nested":[true]}}"#);
    }
}
