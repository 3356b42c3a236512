//! Data model shared by the catalog, graph and emitters

pub mod exclusion;
pub mod metadata;
pub mod row;
pub mod value;

pub use exclusion::ExclusionSet;
pub use metadata::{AssociationEdge, AssociationKind, TableDescriptor};
pub use row::Row;
pub use value::Value;
