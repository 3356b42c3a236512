//! Entity discovery and mapping descriptors

pub mod discover;
pub mod mapping;

pub use discover::{EntityCatalog, NAMESPACE_SEPARATOR};
pub use mapping::{AssociationMapping, EntityMapping, TomlMappingProvider};
