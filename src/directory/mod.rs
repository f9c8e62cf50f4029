//! # Directory Entities
//!
//! A small polymorphic hierarchy in the shape generated entity code takes:
//! a store-backed struct per type, a static codec table extending the
//! parent's, and a discriminator on the base type.
//!
//! | Type | `@odata.type` | Extends |
//! |------|---------------|---------|
//! | `DirectoryObject` | `#microsoft.graph.directoryObject` | — |
//! | `User` | `#microsoft.graph.user` | `DirectoryObject` |
//! | `Group` | `#microsoft.graph.group` | `DirectoryObject` |

pub mod directory_object;
pub mod user;
pub mod group;

pub use directory_object::{DirectoryObject, DirectoryObjectFields, DIRECTORY_OBJECT_CODECS};
pub use user::{User, USER_CODECS};
pub use group::{Group, GROUP_CODECS};
