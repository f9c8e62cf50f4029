//! The `Model` trait and the static descriptor every concrete type carries.

use std::any::Any;
use std::fmt;

use super::{AdditionalData, PropertyStore};
use crate::codec::CodecTable;
use crate::serialization::ParseNode;
use crate::Result;

/// Conventional OData discriminator property.
pub const ODATA_TYPE: &str = "@odata.type";

/// Constructs an empty model for a parse node. Polymorphic bases route this
/// through a `Discriminator`; the caller populates the result afterwards.
pub type ModelFactory = fn(&dyn ParseNode) -> Result<Box<dyn Model>>;

/// Wire identity of a concrete type: which property carries the tag, and
/// the tag value naming this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeTag {
    pub property: &'static str,
    pub value: &'static str,
}

impl TypeTag {
    pub const fn new(property: &'static str, value: &'static str) -> Self {
        Self { property, value }
    }

    /// Tag carried in `@odata.type`.
    pub const fn odata(value: &'static str) -> Self {
        Self::new(ODATA_TYPE, value)
    }
}

/// Static, per-type metadata. Owned by the type definition, never by an
/// instance.
#[derive(Debug)]
pub struct ModelDescriptor {
    /// Type name used in diagnostics.
    pub name: &'static str,
    /// `None` for non-polymorphic types.
    pub type_tag: Option<TypeTag>,
    pub codecs: &'static CodecTable,
}

// ============================================================================
// Model trait
// ============================================================================

/// A store-backed model instance.
///
/// Implementors hold a `PropertyStore` and nothing else; all typed
/// accessors read and write through it.
pub trait Model: ModelClone + fmt::Debug + Send + Sync + 'static {
    fn descriptor(&self) -> &'static ModelDescriptor;
    fn store(&self) -> &PropertyStore;
    fn store_mut(&mut self) -> &mut PropertyStore;

    fn additional_data(&self) -> Option<&AdditionalData> {
        self.store().additional_data()
    }
}

/// Object-safe cloning and `Any` access, implemented for every `Model + Clone`.
pub trait ModelClone {
    fn clone_model(&self) -> Box<dyn Model>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Model + Clone> ModelClone for T {
    fn clone_model(&self) -> Box<dyn Model> { Box::new(self.clone()) }
    fn as_any(&self) -> &dyn Any { self }
    fn as_any_mut(&mut self) -> &mut dyn Any { self }
    fn into_any(self: Box<Self>) -> Box<dyn Any> { self }
}

impl Clone for Box<dyn Model> {
    fn clone(&self) -> Self {
        self.clone_model()
    }
}

/// Two models are equal when they share a concrete type and their stores
/// hold the same visible values.
impl PartialEq for dyn Model {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor().name == other.descriptor().name
            && self.descriptor().type_tag == other.descriptor().type_tag
            && self.store() == other.store()
    }
}

impl dyn Model {
    pub fn is<T: Model>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Model>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Model>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Recover the concrete box, or hand the original back on mismatch.
    pub fn downcast<T: Model>(self: Box<Self>) -> std::result::Result<Box<T>, Box<dyn Model>> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.into_any().downcast::<T>() {
            Ok(model) => Ok(model),
            Err(_) => unreachable!("concrete type checked above"),
        }
    }
}
