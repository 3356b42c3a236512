//! In-memory collaborators for tests

use anyhow::{Result, anyhow};
use std::collections::{HashMap, HashSet};

use super::{EntityMetadataProvider, RowSource, SchemaIntrospector};
use crate::error::DumpError;
use crate::model::{AssociationEdge, AssociationKind, Row, TableDescriptor};

/// Database + mapping fixture implementing every collaborator trait
#[derive(Debug, Default)]
pub struct MemorySource {
    tables: Vec<String>,
    ddl: Vec<String>,
    rows: HashMap<String, Vec<Row>>,
    entities: HashMap<String, (String, Vec<AssociationEdge>)>,
    failing: HashSet<String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table with its rows and a matching CREATE statement
    pub fn table(mut self, name: &str, rows: Vec<Row>) -> Self {
        self.tables.push(name.to_string());
        self.ddl.push(format!("CREATE TABLE {} (id INTEGER)", name));
        self.rows.insert(name.to_string(), rows);
        self
    }

    /// Register an entity mapped to `table`
    pub fn entity(mut self, identifier: &str, table: &str) -> Self {
        self.entities
            .insert(identifier.to_string(), (table.to_string(), Vec::new()));
        self
    }

    /// Owning to-one association `owner -> target`
    pub fn owns(self, owner: &str, target: &str) -> Self {
        self.edge(owner, target, AssociationKind::ToOne, true, None, None)
    }

    /// Owning many-to-many association stored in `join_table`
    pub fn many_to_many(self, owner: &str, target: &str, join_table: &str) -> Self {
        self.edge(
            owner,
            target,
            AssociationKind::ManyToMany,
            true,
            None,
            Some(join_table),
        )
    }

    pub fn edge(
        mut self,
        owner: &str,
        target: &str,
        kind: AssociationKind,
        is_owning_side: bool,
        inverse_name: Option<&str>,
        join_table_name: Option<&str>,
    ) -> Self {
        if let Some((_, edges)) = self.entities.get_mut(owner) {
            edges.push(AssociationEdge {
                target_identifier: target.to_string(),
                kind,
                is_owning_side,
                inverse_name: inverse_name.map(|s| s.to_string()),
                join_table_name: join_table_name.map(|s| s.to_string()),
            });
        }
        self
    }

    /// Make `fetch_all(table)` fail
    pub fn failing(mut self, table: &str) -> Self {
        self.failing.insert(table.to_string());
        self
    }
}

impl SchemaIntrospector for MemorySource {
    fn list_tables(&self) -> Result<Vec<TableDescriptor>> {
        Ok(self.tables.iter().map(TableDescriptor::new).collect())
    }

    fn to_ddl(&self) -> Result<Vec<String>> {
        Ok(self.ddl.clone())
    }
}

impl EntityMetadataProvider for MemorySource {
    fn table_name_of(&self, identifier: &str) -> Result<String> {
        self.entities
            .get(identifier)
            .map(|(table, _)| table.clone())
            .ok_or_else(|| {
                DumpError::UnknownEntity {
                    identifier: identifier.to_string(),
                }
                .into()
            })
    }

    fn associations_of(&self, identifier: &str) -> Result<Vec<AssociationEdge>> {
        self.entities
            .get(identifier)
            .map(|(_, edges)| edges.clone())
            .ok_or_else(|| {
                DumpError::UnknownEntity {
                    identifier: identifier.to_string(),
                }
                .into()
            })
    }
}

impl RowSource for MemorySource {
    fn fetch_all(&self, table: &str) -> Result<Vec<Row>> {
        if self.failing.contains(table) {
            return Err(anyhow!("connection lost while reading '{}'", table));
        }
        Ok(self.rows.get(table).cloned().unwrap_or_default())
    }
}
