//! User — a directory object representing an account.

use chrono::{NaiveDate, NaiveTime};

use super::{DirectoryObject, DIRECTORY_OBJECT_CODECS};
use crate::codec::{CodecTable, FieldCodec};
use crate::model::{Model, ModelDescriptor, PropertyStore, TypeTag, Value};
use crate::Result;

pub static USER_CODECS: CodecTable = CodecTable::extends(&DIRECTORY_OBJECT_CODECS, &[
    FieldCodec::string("displayName"),
    FieldCodec::bool("accountEnabled"),
    FieldCodec::collection_of_strings("businessPhones"),
    FieldCodec::int32("signInCount"),
    FieldCodec::int64("storageUsed"),
    FieldCodec::float64("riskScore"),
    FieldCodec::date("birthday"),
    FieldCodec::time("preferredWakeTime"),
    FieldCodec::bytes("photo"),
    FieldCodec::object("manager", DirectoryObject::create_from_discriminator_value),
]);

static DESCRIPTOR: ModelDescriptor = ModelDescriptor {
    name: "User",
    type_tag: Some(TypeTag::odata(User::ODATA_TYPE)),
    codecs: &USER_CODECS,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    store: PropertyStore,
}

impl User {
    pub const ODATA_TYPE: &'static str = "#microsoft.graph.user";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.store.get_str("displayName")
    }

    pub fn set_display_name(&mut self, value: Option<&str>) -> Result<()> {
        self.store.set("displayName", value)
    }

    pub fn account_enabled(&self) -> Option<bool> {
        self.store.get_as("accountEnabled")
    }

    pub fn set_account_enabled(&mut self, value: Option<bool>) -> Result<()> {
        self.store.set("accountEnabled", value)
    }

    pub fn business_phones(&self) -> Option<Vec<String>> {
        self.store.get_as("businessPhones")
    }

    pub fn set_business_phones(&mut self, value: Option<Vec<String>>) -> Result<()> {
        self.store.set("businessPhones", value)
    }

    pub fn sign_in_count(&self) -> Option<i32> {
        self.store.get_as("signInCount")
    }

    pub fn set_sign_in_count(&mut self, value: Option<i32>) -> Result<()> {
        self.store.set("signInCount", value)
    }

    /// Bytes of mailbox and drive storage in use.
    pub fn storage_used(&self) -> Option<i64> {
        self.store.get_as("storageUsed")
    }

    pub fn set_storage_used(&mut self, value: Option<i64>) -> Result<()> {
        self.store.set("storageUsed", value)
    }

    pub fn risk_score(&self) -> Option<f64> {
        self.store.get_as("riskScore")
    }

    pub fn set_risk_score(&mut self, value: Option<f64>) -> Result<()> {
        self.store.set("riskScore", value)
    }

    pub fn birthday(&self) -> Option<NaiveDate> {
        self.store.get_as("birthday")
    }

    pub fn set_birthday(&mut self, value: Option<NaiveDate>) -> Result<()> {
        self.store.set("birthday", value)
    }

    pub fn preferred_wake_time(&self) -> Option<NaiveTime> {
        self.store.get_as("preferredWakeTime")
    }

    pub fn set_preferred_wake_time(&mut self, value: Option<NaiveTime>) -> Result<()> {
        self.store.set("preferredWakeTime", value)
    }

    pub fn photo(&self) -> Option<&[u8]> {
        self.store.get("photo").and_then(Value::as_bytes)
    }

    pub fn set_photo(&mut self, value: Option<Vec<u8>>) -> Result<()> {
        self.store.set("photo", value)
    }

    /// The manager, as whatever directory subtype the payload named.
    pub fn manager(&self) -> Option<&dyn Model> {
        self.store.get_model("manager")
    }

    pub fn set_manager(&mut self, value: Option<Box<dyn Model>>) -> Result<()> {
        self.store.set("manager", value)
    }
}

impl Model for User {
    fn descriptor(&self) -> &'static ModelDescriptor { &DESCRIPTOR }
    fn store(&self) -> &PropertyStore { &self.store }
    fn store_mut(&mut self) -> &mut PropertyStore { &mut self.store }
}
