//! DirectoryObject — the polymorphic base of the directory hierarchy.

use chrono::{DateTime, FixedOffset};

use super::{Group, User};
use crate::codec::{CodecTable, Constructor, Discriminator, FieldCodec};
use crate::model::{Model, ModelDescriptor, PropertyStore, TypeTag};
use crate::serialization::ParseNode;
use crate::Result;

pub static DIRECTORY_OBJECT_CODECS: CodecTable = CodecTable::new(&[
    FieldCodec::string("id"),
    FieldCodec::date_time("deletedDateTime"),
]);

static DESCRIPTOR: ModelDescriptor = ModelDescriptor {
    name: "DirectoryObject",
    type_tag: Some(TypeTag::odata(DirectoryObject::ODATA_TYPE)),
    codecs: &DIRECTORY_OBJECT_CODECS,
};

static DISCRIMINATOR: Discriminator = Discriminator::odata(
    new_directory_object,
    &[
        (User::ODATA_TYPE, new_user as Constructor),
        (Group::ODATA_TYPE, new_group as Constructor),
    ],
);

fn new_directory_object() -> Box<dyn Model> { Box::new(DirectoryObject::new()) }
fn new_user() -> Box<dyn Model> { Box::new(User::new()) }
fn new_group() -> Box<dyn Model> { Box::new(Group::new()) }

/// Base directory entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryObject {
    store: PropertyStore,
}

impl DirectoryObject {
    pub const ODATA_TYPE: &'static str = "#microsoft.graph.directoryObject";

    pub fn new() -> Self {
        Self::default()
    }

    /// Factory for any slot typed as `DirectoryObject`: picks `User`,
    /// `Group` or the base type from `@odata.type`.
    pub fn create_from_discriminator_value(node: &dyn ParseNode) -> Result<Box<dyn Model>> {
        DISCRIMINATOR.create(node)
    }

    pub fn discriminator() -> &'static Discriminator {
        &DISCRIMINATOR
    }
}

impl Model for DirectoryObject {
    fn descriptor(&self) -> &'static ModelDescriptor { &DESCRIPTOR }
    fn store(&self) -> &PropertyStore { &self.store }
    fn store_mut(&mut self) -> &mut PropertyStore { &mut self.store }
}

/// Accessors shared by `DirectoryObject` and every subtype.
pub trait DirectoryObjectFields: Model {
    fn id(&self) -> Option<&str> {
        self.store().get_str("id")
    }

    fn set_id(&mut self, value: Option<&str>) -> Result<()> {
        self.store_mut().set("id", value)
    }

    fn deleted_date_time(&self) -> Option<DateTime<FixedOffset>> {
        self.store().get_as("deletedDateTime")
    }

    fn set_deleted_date_time(&mut self, value: Option<DateTime<FixedOffset>>) -> Result<()> {
        self.store_mut().set("deletedDateTime", value)
    }
}

impl DirectoryObjectFields for DirectoryObject {}
impl DirectoryObjectFields for User {}
impl DirectoryObjectFields for Group {}
