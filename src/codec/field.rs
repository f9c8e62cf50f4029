//! Field codecs — one `(decode, encode)` pair per wire field.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};

use super::{read_object, read_object_collection, read_primitive, read_primitive_collection};
use crate::model::{ModelFactory, PropertyStore, Value};
use crate::serialization::{ParseNode, SerializationWriter};
use crate::Result;

/// Scalar kinds a field or collection element can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Bytes,
    DateTime,
    Date,
    Time,
}

impl PrimitiveKind {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "boolean",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Float32 => "float32",
            PrimitiveKind::Float64 => "float64",
            PrimitiveKind::String => "string",
            PrimitiveKind::Bytes => "bytes",
            PrimitiveKind::DateTime => "date-time",
            PrimitiveKind::Date => "date",
            PrimitiveKind::Time => "time",
        }
    }
}

/// Shape of a field on the wire.
#[derive(Clone, Copy)]
pub enum FieldKind {
    Primitive(PrimitiveKind),
    /// Nested model built by the factory (often a discriminator).
    Object(ModelFactory),
    PrimitiveCollection(PrimitiveKind),
    ObjectCollection(ModelFactory),
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Primitive(kind) => write!(f, "Primitive({})", kind.name()),
            FieldKind::Object(_) => write!(f, "Object"),
            FieldKind::PrimitiveCollection(kind) => write!(f, "PrimitiveCollection({})", kind.name()),
            FieldKind::ObjectCollection(_) => write!(f, "ObjectCollection"),
        }
    }
}

/// A wire field name bound to its kind. Static, shared by every instance.
#[derive(Debug, Clone, Copy)]
pub struct FieldCodec {
    pub name: &'static str,
    pub kind: FieldKind,
}

// ============================================================================
// Constructors (const, for static tables)
// ============================================================================

impl FieldCodec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }

    pub const fn primitive(name: &'static str, kind: PrimitiveKind) -> Self {
        Self::new(name, FieldKind::Primitive(kind))
    }

    pub const fn bool(name: &'static str) -> Self { Self::primitive(name, PrimitiveKind::Bool) }
    pub const fn int32(name: &'static str) -> Self { Self::primitive(name, PrimitiveKind::Int32) }
    pub const fn int64(name: &'static str) -> Self { Self::primitive(name, PrimitiveKind::Int64) }
    pub const fn float32(name: &'static str) -> Self { Self::primitive(name, PrimitiveKind::Float32) }
    pub const fn float64(name: &'static str) -> Self { Self::primitive(name, PrimitiveKind::Float64) }
    pub const fn string(name: &'static str) -> Self { Self::primitive(name, PrimitiveKind::String) }
    pub const fn bytes(name: &'static str) -> Self { Self::primitive(name, PrimitiveKind::Bytes) }
    pub const fn date_time(name: &'static str) -> Self { Self::primitive(name, PrimitiveKind::DateTime) }
    pub const fn date(name: &'static str) -> Self { Self::primitive(name, PrimitiveKind::Date) }
    pub const fn time(name: &'static str) -> Self { Self::primitive(name, PrimitiveKind::Time) }

    pub const fn object(name: &'static str, factory: ModelFactory) -> Self {
        Self::new(name, FieldKind::Object(factory))
    }

    pub const fn collection_of(name: &'static str, kind: PrimitiveKind) -> Self {
        Self::new(name, FieldKind::PrimitiveCollection(kind))
    }

    pub const fn collection_of_strings(name: &'static str) -> Self {
        Self::collection_of(name, PrimitiveKind::String)
    }

    pub const fn collection_of_objects(name: &'static str, factory: ModelFactory) -> Self {
        Self::new(name, FieldKind::ObjectCollection(factory))
    }
}

// ============================================================================
// Decode / encode
// ============================================================================

impl FieldCodec {
    /// Read this field's value from `node` and store it under the field name.
    /// A wire `null` stores `Null`, which reads back as absent.
    pub fn decode(&self, store: &mut PropertyStore, node: &dyn ParseNode) -> Result<()> {
        let value = match self.kind {
            FieldKind::Primitive(kind) => read_primitive(node, kind)?,
            FieldKind::Object(factory) => Value::from(read_object(node, factory)?),
            FieldKind::PrimitiveCollection(kind) => {
                Value::from(read_primitive_collection(node, kind)?.map(Value::List))
            }
            FieldKind::ObjectCollection(factory) => {
                Value::from(read_object_collection(node, factory)?.map(Value::List))
            }
        };
        store.set(self.name, value)
    }

    /// Write this field from `store`.
    ///
    /// Scalars always reach the writer, absent ones as `None`. Objects and
    /// collections are skipped when absent and written (possibly empty)
    /// when present.
    pub fn encode(&self, store: &PropertyStore, writer: &mut dyn SerializationWriter) -> Result<()> {
        let key = Some(self.name);
        match self.kind {
            FieldKind::Primitive(kind) => encode_primitive(self.name, kind, store, writer),
            FieldKind::Object(_) => match store.get_model(self.name) {
                Some(model) => writer.write_object_value(key, Some(model)),
                None => Ok(()),
            },
            FieldKind::PrimitiveCollection(_) => match store.get_list(self.name) {
                Some(items) => writer.write_collection_of_primitive_values(key, items),
                None => Ok(()),
            },
            FieldKind::ObjectCollection(_) => match store.get_list(self.name) {
                Some(items) => writer.write_collection_of_object_values(key, items),
                None => Ok(()),
            },
        }
    }
}

fn encode_primitive(
    name: &str,
    kind: PrimitiveKind,
    store: &PropertyStore,
    writer: &mut dyn SerializationWriter,
) -> Result<()> {
    let key = Some(name);
    match kind {
        PrimitiveKind::Bool => writer.write_bool_value(key, store.get_as::<bool>(name)),
        PrimitiveKind::Int32 => writer.write_i32_value(key, store.get_as::<i32>(name)),
        PrimitiveKind::Int64 => writer.write_i64_value(key, store.get_as::<i64>(name)),
        PrimitiveKind::Float32 => writer.write_f32_value(key, store.get_as::<f32>(name)),
        PrimitiveKind::Float64 => writer.write_f64_value(key, store.get_as::<f64>(name)),
        PrimitiveKind::String => writer.write_string_value(key, store.get_str(name)),
        PrimitiveKind::Bytes => writer.write_bytes_value(key, store.get(name).and_then(Value::as_bytes)),
        PrimitiveKind::DateTime => {
            let value = store.get_as::<DateTime<FixedOffset>>(name);
            writer.write_date_time_value(key, value.as_ref())
        }
        PrimitiveKind::Date => writer.write_date_value(key, store.get_as::<NaiveDate>(name)),
        PrimitiveKind::Time => writer.write_time_value(key, store.get_as::<NaiveTime>(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::{JsonParseNode, JsonSerializationWriter};
    use crate::Error;

    fn decode_one(codec: FieldCodec, json: &str) -> Result<PropertyStore> {
        let node = json.parse::<JsonParseNode>()?;
        let mut store = PropertyStore::new();
        codec.decode(&mut store, &node)?;
        Ok(store)
    }

    #[test]
    fn test_decode_primitive() {
        let store = decode_one(FieldCodec::int64("size"), "42").unwrap();
        assert_eq!(store.get_as::<i64>("size"), Some(42));
    }

    #[test]
    fn test_decode_null_is_absent() {
        let store = decode_one(FieldCodec::string("displayName"), "null").unwrap();
        assert!(store.get("displayName").is_none());
    }

    #[test]
    fn test_decode_malformed_primitive() {
        let err = decode_one(FieldCodec::bool("accountEnabled"), "\"true\"").unwrap_err();
        assert!(matches!(err, Error::MalformedValue { .. }));
    }

    #[test]
    fn test_decode_collection() {
        let store = decode_one(FieldCodec::collection_of_strings("businessPhones"), r#"["1","2"]"#).unwrap();
        assert_eq!(store.get_as::<Vec<String>>("businessPhones"), Some(vec!["1".into(), "2".into()]));

        let store = decode_one(FieldCodec::collection_of("counts", PrimitiveKind::Int32), "[]").unwrap();
        assert_eq!(store.get_list("counts").map(<[Value]>::len), Some(0));

        let err = decode_one(FieldCodec::collection_of("counts", PrimitiveKind::Int32), r#"[1,"2"]"#).unwrap_err();
        assert!(matches!(err, Error::MalformedValue { ref path, .. } if path == "$[1]"));
    }

    #[test]
    fn test_encode_absent_scalar_reaches_writer_as_none() {
        let store = PropertyStore::new();
        let mut writer = JsonSerializationWriter::new();
        FieldCodec::string("displayName").encode(&store, &mut writer).unwrap();
        // Omitted by the writer at document root.
        assert_eq!(writer.flush().unwrap(), b"");
    }

    #[test]
    fn test_encode_absent_collection_is_skipped() {
        let store = PropertyStore::new();
        let mut writer = JsonSerializationWriter::new();
        FieldCodec::collection_of_strings("businessPhones").encode(&store, &mut writer).unwrap();
        assert_eq!(writer.flush().unwrap(), b"");
    }

    #[test]
    fn test_field_kind_debug() {
        assert_eq!(format!("{:?}", FieldCodec::int32("n").kind), "Primitive(int32)");
    }
}
