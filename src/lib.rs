//! # odata-model — Self-Describing Model Objects
//!
//! Generic plumbing for entity types exchanged as OData-style JSON.
//! Every model keeps its state in a [`PropertyStore`], declares a static
//! [`CodecTable`] of wire fields, and (when polymorphic) is constructed
//! through a [`Discriminator`] keyed by `@odata.type`.
//!
//! ## Design Principles
//!
//! 1. **Store-backed models**: a model instance is a type identity plus a
//!    property store, nothing else
//! 2. **Static codec tables**: field codecs are declared once per type and
//!    compose by extension, never by replacement
//! 3. **Forward compatible**: unknown fields land in additional data,
//!    unknown subtypes degrade to the declared base type
//! 4. **Format-agnostic core**: `ParseNode` and `SerializationWriter` are
//!    the only contracts the codec layer sees
//!
//! ## Quick Start
//!
//! ```rust
//! use odata_model::directory::{DirectoryObject, DirectoryObjectFields, User};
//!
//! # fn example() -> odata_model::Result<()> {
//! let payload = br##"{"@odata.type":"#microsoft.graph.user","id":"42","displayName":"Ada"}"##;
//! let object = odata_model::from_json(payload, DirectoryObject::create_from_discriminator_value)?;
//!
//! let user = object.downcast_ref::<User>().expect("user subtype");
//! assert_eq!(user.id(), Some("42"));
//! assert_eq!(user.display_name(), Some("Ada"));
//!
//! let bytes = odata_model::to_json(object.as_ref())?;
//! assert_eq!(bytes.as_slice(), payload.as_slice());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Layers
//!
//! | Module | Description |
//! |--------|-------------|
//! | `model` | `Value`, `PropertyStore`, the `Model` trait |
//! | `codec` | Field codec tables, discriminator dispatch, decode/encode |
//! | `serialization` | `ParseNode` / `SerializationWriter` contracts + JSON |
//! | `config` | `JsonConfig` |
//! | `directory` | Sample entity hierarchy |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod codec;
pub mod serialization;
pub mod config;
pub mod directory;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Value, PropertyStore, AdditionalData, FromValue,
    Model, ModelDescriptor, ModelFactory, TypeTag,
    ADDITIONAL_DATA_KEY, ODATA_TYPE,
};

// ============================================================================
// Re-exports: Codec
// ============================================================================

pub use codec::{
    CodecTable, FieldCodec, FieldKind, PrimitiveKind, Discriminator,
    decode_into, read_object, serialize,
};

// ============================================================================
// Re-exports: Serialization
// ============================================================================

pub use serialization::{
    ParseNode, SerializationWriter,
    JsonParseNode, JsonSerializationWriter,
};

pub use config::JsonConfig;

// ============================================================================
// Top-level JSON entry points
// ============================================================================

/// Decode a JSON payload into a model constructed by `factory`.
///
/// A `null` document is reported as a malformed value: the caller asked
/// for an object.
pub fn from_json(bytes: &[u8], factory: ModelFactory) -> Result<Box<dyn Model>> {
    from_json_with(bytes, factory, &JsonConfig::default())
}

/// Same as [`from_json`] with an explicit configuration.
pub fn from_json_with(
    bytes: &[u8],
    factory: ModelFactory,
    config: &JsonConfig,
) -> Result<Box<dyn Model>> {
    let node = JsonParseNode::from_slice(bytes)?.with_config(config.clone());
    read_object(&node, factory)?.ok_or_else(|| Error::MalformedValue {
        path: node.path().to_owned(),
        expected: "object".into(),
        got: "null".into(),
    })
}

/// Decode a JSON payload and require the result to be exactly `T`.
pub fn from_json_as<T: Model>(bytes: &[u8], factory: ModelFactory) -> Result<T> {
    let model = from_json(bytes, factory)?;
    let got = model.descriptor().name;
    model.downcast::<T>().map(|boxed| *boxed).map_err(|_| Error::TypeError {
        expected: std::any::type_name::<T>().into(),
        got: got.into(),
    })
}

/// Encode a model as compact JSON.
pub fn to_json(model: &dyn Model) -> Result<Vec<u8>> {
    to_json_with(model, &JsonConfig::default())
}

/// Encode a model as JSON with an explicit configuration.
pub fn to_json_with(model: &dyn Model, config: &JsonConfig) -> Result<Vec<u8>> {
    let mut writer = JsonSerializationWriter::with_config(config.clone());
    writer.write_object_value(None, Some(model))?;
    writer.flush()
}

/// Encode a model as JSON straight into `out`, followed by a newline.
pub fn to_writer(model: &dyn Model, config: &JsonConfig, out: &mut dyn std::io::Write) -> Result<()> {
    let bytes = to_json_with(model, config)?;
    out.write_all(&bytes)?;
    writeln!(out)?;
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed value at `{path}`: expected {expected}, got {got}")]
    MalformedValue { path: String, expected: String, got: String },

    #[error("Property store fault: {0}")]
    StoreFault(String),

    #[error("Type error: expected {expected}, got {got}")]
    TypeError { expected: String, got: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
