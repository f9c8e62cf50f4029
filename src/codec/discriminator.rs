//! Discriminator dispatch for polymorphic slots.
//!
//! A fixed table maps a tag string to a subtype constructor. Matching is
//! exact and case-sensitive. Anything else, including a missing or
//! non-string tag, constructs the declared base type so payloads from a
//! newer schema still decode.

use crate::model::{Model, ODATA_TYPE};
use crate::serialization::ParseNode;
use crate::Result;

/// Builds an empty instance of one concrete type.
pub type Constructor = fn() -> Box<dyn Model>;

#[derive(Debug)]
pub struct Discriminator {
    /// Wire property carrying the tag.
    pub property: &'static str,
    pub base: Constructor,
    pub variants: &'static [(&'static str, Constructor)],
}

impl Discriminator {
    pub const fn new(
        property: &'static str,
        base: Constructor,
        variants: &'static [(&'static str, Constructor)],
    ) -> Self {
        Self { property, base, variants }
    }

    /// Discriminator keyed by `@odata.type`.
    pub const fn odata(base: Constructor, variants: &'static [(&'static str, Constructor)]) -> Self {
        Self::new(ODATA_TYPE, base, variants)
    }

    /// The tag carried by `node`, if it is an object with a string tag.
    pub fn tag_of(&self, node: &dyn ParseNode) -> Option<String> {
        node.child_node(self.property)?.get_string_value().ok().flatten()
    }

    /// Pick the constructor for `tag` and run it.
    pub fn resolve(&self, tag: Option<&str>) -> Box<dyn Model> {
        let Some(tag) = tag else { return (self.base)() };
        if let Some((_, construct)) = self.variants.iter().find(|(known, _)| *known == tag) {
            return construct();
        }
        let base = (self.base)();
        if base.descriptor().type_tag.map(|own| own.value) != Some(tag) {
            tracing::debug!(
                tag,
                property = self.property,
                base = base.descriptor().name,
                "unknown discriminator tag, constructing base type"
            );
        }
        base
    }

    /// Construct the most specific known type for `node`. Never fails on
    /// the tag itself.
    pub fn create(&self, node: &dyn ParseNode) -> Result<Box<dyn Model>> {
        Ok(self.resolve(self.tag_of(node).as_deref()))
    }

    /// Every registered subtype tag.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variants.iter().map(|(tag, _)| *tag)
    }
}
