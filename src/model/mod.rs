//! # Model Layer
//!
//! The data every generated entity is made of: tagged values, the property
//! store that backs each instance, and the `Model` trait that ties a store
//! to a static type descriptor.
//!
//! Design rule: NO wire format here. This module is pure data; it never
//! sees a parse node or a writer.

pub mod value;
pub mod property_map;
pub mod descriptor;

pub use value::{Value, FromValue};
pub use property_map::{PropertyStore, AdditionalData, ADDITIONAL_DATA_KEY};
pub use descriptor::{Model, ModelClone, ModelDescriptor, ModelFactory, TypeTag, ODATA_TYPE};
