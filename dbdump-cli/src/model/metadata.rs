//! Entity and relationship metadata

use serde::Deserialize;

/// Cardinality of an association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssociationKind {
    #[serde(alias = "one-to-one", alias = "many-to-one")]
    ToOne,
    #[serde(alias = "one-to-many")]
    ToMany,
    ManyToMany,
}

/// Directed relationship from an owning entity to a target entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationEdge {
    pub target_identifier: String,
    pub kind: AssociationKind,
    pub is_owning_side: bool,
    pub inverse_name: Option<String>,
    /// Only present for many-to-many
    pub join_table_name: Option<String>,
}

impl AssociationEdge {
    /// Whether the target's rows must be inserted before the owner's
    ///
    /// Holds for the owning side, or for a non-owning side that declares
    /// its inverse (bidirectional declaration).
    pub fn is_data_dependency(&self) -> bool {
        self.is_owning_side || self.inverse_name.is_some()
    }

    /// Join table to record, if this edge owns a many-to-many association
    pub fn owned_join_table(&self) -> Option<&str> {
        match self.kind {
            AssociationKind::ManyToMany if self.is_owning_side => self.join_table_name.as_deref(),
            _ => None,
        }
    }
}

/// Table as listed by a `SchemaIntrospector`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    pub name: String,
}

impl TableDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
