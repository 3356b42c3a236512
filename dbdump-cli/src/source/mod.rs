//! Collaborator interfaces the dumper consumes
//!
//! The core never talks to a database directly: schema DDL, table listing,
//! entity metadata and row fetching all go through these traits.

pub mod sqlite;

#[cfg(test)]
pub mod memory;

use anyhow::Result;

use crate::model::{AssociationEdge, Row, TableDescriptor};

pub use sqlite::SqliteSource;

/// Schema-level view of the database
pub trait SchemaIntrospector {
    /// All user tables, in a stable order
    fn list_tables(&self) -> Result<Vec<TableDescriptor>>;

    /// DDL statements recreating the schema, without trailing `;`
    fn to_ddl(&self) -> Result<Vec<String>>;
}

/// Mapping metadata for entities
pub trait EntityMetadataProvider {
    fn table_name_of(&self, identifier: &str) -> Result<String>;

    /// Associations declared by the entity, in declaration order
    fn associations_of(&self, identifier: &str) -> Result<Vec<AssociationEdge>>;
}

/// Raw table contents
pub trait RowSource {
    /// Every row of `table`; field order is identical across rows
    fn fetch_all(&self, table: &str) -> Result<Vec<Row>>;
}
