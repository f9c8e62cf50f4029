//! # Codec Layer
//!
//! Generic decode and encode driven by static codec tables.
//! Pure functions over a model's store and a parse node or writer, with no I/O
//! of its own, no global state beyond the lazily flattened tables.
//!
//! ```text
//! bytes → ParseNode → factory / Discriminator → empty model
//!       → decode_into (one codec per field, unknowns → additional data)
//!
//! model → serialize → type tag, codec entries in table order, additional data
//!       → SerializationWriter → bytes
//! ```

pub mod field;
pub mod table;
pub mod discriminator;

pub use field::{FieldCodec, FieldKind, PrimitiveKind};
pub use table::CodecTable;
pub use discriminator::{Constructor, Discriminator};

use crate::model::{
    AdditionalData, Model, ModelDescriptor, ModelFactory, PropertyStore, Value, ADDITIONAL_DATA_KEY,
};
use crate::serialization::{ParseNode, SerializationWriter};
use crate::Result;

// ============================================================================
// Decode
// ============================================================================

/// Populate `model` from an object node, one codec call per input field.
///
/// The model's own type tag is consumed. A different tag (an unknown
/// subtype decoded as its base) and fields without a codec are kept in
/// additional data. The first malformed field aborts; fields already
/// assigned stay assigned.
pub fn decode_into(model: &mut dyn Model, node: &dyn ParseNode) -> Result<()> {
    let descriptor = model.descriptor();
    let store = model.store_mut();
    store.set_initialization_completed(false);
    let result = decode_fields(descriptor, store, node);
    // Restored on every exit: setters after a failed decode must still be tracked.
    store.set_initialization_completed(true);
    result
}

fn decode_fields(descriptor: &ModelDescriptor, store: &mut PropertyStore, node: &dyn ParseNode) -> Result<()> {
    let Some(fields) = node.object_fields()? else {
        return Err(node.malformed("object", "null"));
    };

    let mut unknown = AdditionalData::new();
    for (name, child) in fields {
        match descriptor.type_tag {
            Some(tag) if tag.property == name => {
                if child.get_string_value().ok().flatten().as_deref() == Some(tag.value) {
                    continue;
                }
            }
            _ => {
                if let Some(codec) = descriptor.codecs.get(name) {
                    codec.decode(store, child.as_ref())?;
                    continue;
                }
            }
        }

        if node.preserve_unknown_fields() {
            tracing::trace!(field = name, path = node.path(), "retaining unknown field");
            unknown.insert(name.to_owned(), child.untyped_value());
        } else {
            tracing::trace!(field = name, path = node.path(), "dropping unknown field");
        }
    }

    if !unknown.is_empty() {
        let mut additional = store.additional_data().cloned().unwrap_or_default();
        additional.extend(unknown);
        store.set(ADDITIONAL_DATA_KEY, Value::Map(additional))?;
    }
    Ok(())
}

/// Build and populate a model. A `null` node yields `None`.
pub fn read_object(node: &dyn ParseNode, factory: ModelFactory) -> Result<Option<Box<dyn Model>>> {
    if node.is_null() {
        return Ok(None);
    }
    let mut model = factory(node)?;
    decode_into(model.as_mut(), node)?;
    Ok(Some(model))
}

/// Decode an array of objects; `null` elements are kept as `Value::Null`.
pub fn read_object_collection(node: &dyn ParseNode, factory: ModelFactory) -> Result<Option<Vec<Value>>> {
    let Some(items) = node.collection_items()? else { return Ok(None) };
    items
        .iter()
        .map(|item| read_object(item.as_ref(), factory).map(Value::from))
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Decode one scalar. A wire `null` yields `Value::Null`.
pub fn read_primitive(node: &dyn ParseNode, kind: PrimitiveKind) -> Result<Value> {
    Ok(match kind {
        PrimitiveKind::Bool => node.get_bool_value()?.into(),
        PrimitiveKind::Int32 => node.get_i32_value()?.into(),
        PrimitiveKind::Int64 => node.get_i64_value()?.into(),
        PrimitiveKind::Float32 => node.get_f32_value()?.into(),
        PrimitiveKind::Float64 => node.get_f64_value()?.into(),
        PrimitiveKind::String => node.get_string_value()?.into(),
        PrimitiveKind::Bytes => node.get_bytes_value()?.into(),
        PrimitiveKind::DateTime => node.get_date_time_value()?.into(),
        PrimitiveKind::Date => node.get_date_value()?.into(),
        PrimitiveKind::Time => node.get_time_value()?.into(),
    })
}

/// Decode an array of scalars of one kind.
pub fn read_primitive_collection(node: &dyn ParseNode, kind: PrimitiveKind) -> Result<Option<Vec<Value>>> {
    let Some(items) = node.collection_items()? else { return Ok(None) };
    items
        .iter()
        .map(|item| read_primitive(item.as_ref(), kind))
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

// ============================================================================
// Encode
// ============================================================================

/// Write `model`'s fields: type tag, table entries in order, additional data.
///
/// The tag comes from the concrete type unless additional data retained a
/// foreign tag from decoding (of any JSON kind), which then wins so unknown
/// subtypes survive a round trip. Additional-data keys naming a declared
/// field are skipped; the field's own value is authoritative. Stops at the
/// first writer error.
pub fn serialize(model: &dyn Model, writer: &mut dyn SerializationWriter) -> Result<()> {
    let descriptor = model.descriptor();
    let store = model.store();
    let additional = store.additional_data();

    if let Some(tag) = descriptor.type_tag {
        match additional.and_then(|data| data.get(tag.property)) {
            Some(retained) => writer.write_untyped_value(Some(tag.property), retained)?,
            None => writer.write_string_value(Some(tag.property), Some(tag.value))?,
        }
    }

    for codec in descriptor.codecs.iter() {
        codec.encode(store, writer)?;
    }

    let Some(data) = additional else { return Ok(()) };
    let tag_property = descriptor.type_tag.map(|tag| tag.property);
    for (key, value) in data {
        if Some(key.as_str()) == tag_property {
            continue;
        }
        if descriptor.codecs.contains(key) {
            tracing::debug!(
                field = key.as_str(),
                model = descriptor.name,
                "additional data shadows a declared field, skipping"
            );
            continue;
        }
        writer.write_untyped_value(Some(key), value)?;
    }
    Ok(())
}
