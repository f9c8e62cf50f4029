//! JSON parse node over `serde_json::Value`.
//!
//! Coercion is strict: integers must fit the requested width, floats are
//! never truncated into integers, and strings are never parsed as numbers.

use std::borrow::Cow;
use std::str::FromStr;

use serde_json::Value as JsonValue;

use super::{json_type_name, ParseNode};
use crate::config::JsonConfig;
use crate::{Error, Result};

/// A position in a JSON document. The root owns its document; children
/// borrow from it.
#[derive(Debug, Clone)]
pub struct JsonParseNode<'a> {
    value: Cow<'a, JsonValue>,
    path: String,
    preserve_unknown_fields: bool,
}

impl JsonParseNode<'static> {
    /// Parse raw bytes into an owning root node.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: JsonValue = serde_json::from_slice(bytes)?;
        Ok(Self::root(Cow::Owned(value)))
    }

}

impl FromStr for JsonParseNode<'static> {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(text)?;
        Ok(Self::root(Cow::Owned(value)))
    }
}

impl<'a> JsonParseNode<'a> {
    /// Wrap an already-parsed document without copying it.
    pub fn new(value: &'a JsonValue) -> Self {
        Self::root(Cow::Borrowed(value))
    }

    fn root(value: Cow<'a, JsonValue>) -> Self {
        Self {
            value,
            path: "$".to_owned(),
            preserve_unknown_fields: true,
        }
    }

    pub fn with_config(mut self, config: JsonConfig) -> Self {
        self.preserve_unknown_fields = config.preserve_unknown_fields;
        self
    }

    pub fn value(&self) -> &JsonValue {
        &self.value
    }

    fn child<'b>(&self, value: &'b JsonValue, path: String) -> JsonParseNode<'b> {
        JsonParseNode {
            value: Cow::Borrowed(value),
            path,
            preserve_unknown_fields: self.preserve_unknown_fields,
        }
    }

    fn number_description(number: &serde_json::Number) -> String {
        if number.is_f64() {
            format!("non-integer number {number}")
        } else {
            format!("out-of-range number {number}")
        }
    }
}

impl ParseNode for JsonParseNode<'_> {
    fn path(&self) -> &str {
        &self.path
    }

    fn is_null(&self) -> bool {
        self.value.is_null()
    }

    fn child_node(&self, name: &str) -> Option<Box<dyn ParseNode + '_>> {
        let value = self.value.as_object()?.get(name)?;
        Some(Box::new(self.child(value, format!("{}.{}", self.path, name))))
    }

    fn object_fields(&self) -> Result<Option<Vec<(&str, Box<dyn ParseNode + '_>)>>> {
        match self.value.as_ref() {
            JsonValue::Null => Ok(None),
            JsonValue::Object(map) => Ok(Some(
                map.iter()
                    .map(|(name, value)| {
                        let node: Box<dyn ParseNode + '_> =
                            Box::new(self.child(value, format!("{}.{}", self.path, name)));
                        (name.as_str(), node)
                    })
                    .collect(),
            )),
            other => Err(self.malformed("object", json_type_name(other))),
        }
    }

    fn collection_items(&self) -> Result<Option<Vec<Box<dyn ParseNode + '_>>>> {
        match self.value.as_ref() {
            JsonValue::Null => Ok(None),
            JsonValue::Array(items) => Ok(Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, value)| {
                        let node: Box<dyn ParseNode + '_> =
                            Box::new(self.child(value, format!("{}[{}]", self.path, i)));
                        node
                    })
                    .collect(),
            )),
            other => Err(self.malformed("array", json_type_name(other))),
        }
    }

    fn get_bool_value(&self) -> Result<Option<bool>> {
        match self.value.as_ref() {
            JsonValue::Null => Ok(None),
            JsonValue::Bool(b) => Ok(Some(*b)),
            other => Err(self.malformed("boolean", json_type_name(other))),
        }
    }

    fn get_i32_value(&self) -> Result<Option<i32>> {
        match self.value.as_ref() {
            JsonValue::Null => Ok(None),
            JsonValue::Number(n) => n
                .as_i64()
                .and_then(|i| i32::try_from(i).ok())
                .map(Some)
                .ok_or_else(|| self.malformed("int32", &Self::number_description(n))),
            other => Err(self.malformed("int32", json_type_name(other))),
        }
    }

    fn get_i64_value(&self) -> Result<Option<i64>> {
        match self.value.as_ref() {
            JsonValue::Null => Ok(None),
            JsonValue::Number(n) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| self.malformed("int64", &Self::number_description(n))),
            other => Err(self.malformed("int64", json_type_name(other))),
        }
    }

    fn get_f32_value(&self) -> Result<Option<f32>> {
        let Some(wide) = self.get_f64_value()? else { return Ok(None) };
        let narrow = wide as f32;
        if narrow.is_finite() {
            Ok(Some(narrow))
        } else {
            Err(self.malformed("float32", &format!("out-of-range number {wide}")))
        }
    }

    fn get_f64_value(&self) -> Result<Option<f64>> {
        match self.value.as_ref() {
            JsonValue::Null => Ok(None),
            JsonValue::Number(n) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.malformed("float64", &Self::number_description(n))),
            other => Err(self.malformed("float64", json_type_name(other))),
        }
    }

    fn get_string_value(&self) -> Result<Option<String>> {
        match self.value.as_ref() {
            JsonValue::Null => Ok(None),
            JsonValue::String(s) => Ok(Some(s.clone())),
            other => Err(self.malformed("string", json_type_name(other))),
        }
    }

    fn untyped_value(&self) -> JsonValue {
        self.value.as_ref().clone()
    }

    fn preserve_unknown_fields(&self) -> bool {
        self.preserve_unknown_fields
    }
}
