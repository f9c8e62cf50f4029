//! Group — a directory object with polymorphic member lists.

use chrono::{DateTime, FixedOffset};

use super::{DirectoryObject, DIRECTORY_OBJECT_CODECS};
use crate::codec::{CodecTable, FieldCodec};
use crate::model::{Model, ModelDescriptor, PropertyStore, TypeTag};
use crate::Result;

pub static GROUP_CODECS: CodecTable = CodecTable::extends(&DIRECTORY_OBJECT_CODECS, &[
    FieldCodec::string("displayName"),
    FieldCodec::bool("mailEnabled"),
    FieldCodec::collection_of_strings("groupTypes"),
    FieldCodec::date_time("createdDateTime"),
    FieldCodec::float32("quota"),
    FieldCodec::collection_of_objects("members", DirectoryObject::create_from_discriminator_value),
    FieldCodec::collection_of_objects("owners", DirectoryObject::create_from_discriminator_value),
]);

static DESCRIPTOR: ModelDescriptor = ModelDescriptor {
    name: "Group",
    type_tag: Some(TypeTag::odata(Group::ODATA_TYPE)),
    codecs: &GROUP_CODECS,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    store: PropertyStore,
}

impl Group {
    pub const ODATA_TYPE: &'static str = "#microsoft.graph.group";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.store.get_str("displayName")
    }

    pub fn set_display_name(&mut self, value: Option<&str>) -> Result<()> {
        self.store.set("displayName", value)
    }

    pub fn mail_enabled(&self) -> Option<bool> {
        self.store.get_as("mailEnabled")
    }

    pub fn set_mail_enabled(&mut self, value: Option<bool>) -> Result<()> {
        self.store.set("mailEnabled", value)
    }

    pub fn group_types(&self) -> Option<Vec<String>> {
        self.store.get_as("groupTypes")
    }

    pub fn set_group_types(&mut self, value: Option<Vec<String>>) -> Result<()> {
        self.store.set("groupTypes", value)
    }

    pub fn created_date_time(&self) -> Option<DateTime<FixedOffset>> {
        self.store.get_as("createdDateTime")
    }

    pub fn set_created_date_time(&mut self, value: Option<DateTime<FixedOffset>>) -> Result<()> {
        self.store.set("createdDateTime", value)
    }

    pub fn quota(&self) -> Option<f32> {
        self.store.get_as("quota")
    }

    pub fn set_quota(&mut self, value: Option<f32>) -> Result<()> {
        self.store.set("quota", value)
    }

    pub fn members(&self) -> Option<Vec<&dyn Model>> {
        self.store.get_models("members")
    }

    pub fn set_members(&mut self, value: Option<Vec<Box<dyn Model>>>) -> Result<()> {
        self.store.set("members", value)
    }

    pub fn owners(&self) -> Option<Vec<&dyn Model>> {
        self.store.get_models("owners")
    }

    pub fn set_owners(&mut self, value: Option<Vec<Box<dyn Model>>>) -> Result<()> {
        self.store.set("owners", value)
    }
}

impl Model for Group {
    fn descriptor(&self) -> &'static ModelDescriptor { &DESCRIPTOR }
    fn store(&self) -> &PropertyStore { &self.store }
    fn store_mut(&mut self) -> &mut PropertyStore { &mut self.store }
}
