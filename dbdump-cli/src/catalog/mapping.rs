//! TOML mapping descriptors and the metadata provider reading them
//!
//! A descriptor names the entity's table and lists its associations:
//!
//! ```toml
//! table = "books"
//!
//! [[associations]]
//! field = "author"
//! target = "app::entity::Author"
//! kind = "many-to-one"
//! owning_side = true
//! inversed_by = "books"
//!
//! [[associations]]
//! field = "tags"
//! target = "app::entity::Tag"
//! kind = "many-to-many"
//! owning_side = true
//! join_table = "book_tag"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::EntityCatalog;
use crate::error::DumpError;
use crate::model::{AssociationEdge, AssociationKind};
use crate::source::EntityMetadataProvider;

/// Parsed mapping descriptor for one entity
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntityMapping {
    pub table: String,
    #[serde(default)]
    pub associations: Vec<AssociationMapping>,
}

/// One `[[associations]]` entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssociationMapping {
    /// Property name on the entity (informational)
    #[serde(default)]
    pub field: Option<String>,
    pub target: String,
    pub kind: AssociationKind,
    #[serde(default)]
    pub owning_side: bool,
    #[serde(default)]
    pub inversed_by: Option<String>,
    #[serde(default)]
    pub join_table: Option<String>,
}

impl EntityMapping {
    /// Parse and validate a descriptor
    pub fn parse(identifier: &str, content: &str) -> Result<Self> {
        let mapping: EntityMapping = toml::from_str(content).map_err(|e| DumpError::InvalidMapping {
            identifier: identifier.to_string(),
            message: e.message().to_string(),
        })?;

        if mapping.table.trim().is_empty() {
            return Err(DumpError::InvalidMapping {
                identifier: identifier.to_string(),
                message: "table name is empty".to_string(),
            }
            .into());
        }

        for assoc in &mapping.associations {
            if assoc.kind == AssociationKind::ManyToMany && assoc.owning_side && assoc.join_table.is_none() {
                return Err(DumpError::InvalidMapping {
                    identifier: identifier.to_string(),
                    message: format!(
                        "owning many-to-many association to '{}' has no join_table",
                        assoc.target
                    ),
                }
                .into());
            }
        }

        Ok(mapping)
    }

    fn edges(&self) -> Vec<AssociationEdge> {
        self.associations
            .iter()
            .map(|a| AssociationEdge {
                target_identifier: a.target.clone(),
                kind: a.kind,
                is_owning_side: a.owning_side,
                inverse_name: a.inversed_by.clone(),
                join_table_name: match a.kind {
                    AssociationKind::ManyToMany => a.join_table.clone(),
                    _ => None,
                },
            })
            .collect()
    }
}

/// Metadata provider backed by a directory of TOML descriptors
///
/// Descriptors are read fresh on every [`TomlMappingProvider::load`]; nothing
/// is cached across dumps.
#[derive(Debug, Clone, Default)]
pub struct TomlMappingProvider {
    mappings: HashMap<String, EntityMapping>,
}

impl TomlMappingProvider {
    /// Discover and parse every descriptor below `root`
    pub fn load(root: &Path, namespace: &str) -> Result<Self> {
        let mut provider = Self::default();

        for entity in EntityCatalog::discover_files(root, namespace)? {
            let content = fs::read_to_string(&entity.path)
                .with_context(|| format!("Failed to read mapping: {}", entity.path.display()))?;
            let mapping = EntityMapping::parse(&entity.identifier, &content)?;
            provider.mappings.insert(entity.identifier, mapping);
        }

        Ok(provider)
    }

    fn mapping(&self, identifier: &str) -> Result<&EntityMapping> {
        self.mappings.get(identifier).ok_or_else(|| {
            DumpError::UnknownEntity {
                identifier: identifier.to_string(),
            }
            .into()
        })
    }
}

impl EntityMetadataProvider for TomlMappingProvider {
    fn table_name_of(&self, identifier: &str) -> Result<String> {
        Ok(self.mapping(identifier)?.table.clone())
    }

    fn associations_of(&self, identifier: &str) -> Result<Vec<AssociationEdge>> {
        Ok(self.mapping(identifier)?.edges())
    }
}
