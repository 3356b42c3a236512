//! Dependency tree construction from association metadata

use anyhow::Result;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::error::DumpError;
use crate::model::ExclusionSet;
use crate::source::EntityMetadataProvider;

/// One entity in the tree and the entities that must be written before it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    pub identifier: String,
    pub table: String,
    /// Identifiers of direct dependencies, in association order
    pub dependencies: Vec<String>,
}

/// Auxiliary many-to-many association table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinTableEntry {
    pub table: String,
}

/// Per-entity dependency tree plus the join tables met while building it
#[derive(Debug, Clone, Default)]
pub struct DependencyTree {
    /// Root entities in catalog discovery order (excluded ones omitted)
    pub roots: Vec<String>,
    /// Memoized nodes for roots and every transitively reached target
    pub nodes: HashMap<String, DependencyNode>,
    /// Join tables in the order they were first recorded
    pub join_tables: Vec<JoinTableEntry>,
}

impl DependencyTree {
    pub fn node(&self, identifier: &str) -> Option<&DependencyNode> {
        self.nodes.get(identifier)
    }
}

/// Build the dependency tree for `identifiers`
///
/// Fails with [`DumpError::ExcludedDependency`] as soon as an included entity
/// depends on an excluded table, and with [`DumpError::CyclicDependency`] when
/// associations between distinct entities form a cycle.
pub fn build_dependency_tree(
    identifiers: &[String],
    exclusions: &ExclusionSet,
    provider: &dyn EntityMetadataProvider,
) -> Result<DependencyTree> {
    let mut builder = TreeBuilder {
        provider,
        exclusions,
        nodes: HashMap::new(),
        join_tables: Vec::new(),
        recorded_join_tables: HashSet::new(),
        stack: Vec::new(),
    };

    let mut roots = Vec::new();

    for identifier in identifiers {
        let table = provider.table_name_of(identifier)?;
        if exclusions.contains(&table) {
            log::debug!("Skipping excluded entity {} ({})", identifier, table);
            continue;
        }

        builder.resolve(identifier)?;
        if !roots.contains(identifier) {
            roots.push(identifier.clone());
        }
    }

    log::debug!(
        "Dependency tree: {} roots, {} nodes, {} join tables",
        roots.len(),
        builder.nodes.len(),
        builder.join_tables.len()
    );

    Ok(DependencyTree {
        roots,
        nodes: builder.nodes,
        join_tables: builder.join_tables,
    })
}

/// Resolution state for a single build
struct TreeBuilder<'a> {
    provider: &'a dyn EntityMetadataProvider,
    exclusions: &'a ExclusionSet,
    nodes: HashMap<String, DependencyNode>,
    join_tables: Vec<JoinTableEntry>,
    recorded_join_tables: HashSet<String>,
    /// Entities currently being resolved, outermost first
    stack: Vec<String>,
}

impl TreeBuilder<'_> {
    fn resolve(&mut self, identifier: &str) -> Result<()> {
        if self.nodes.contains_key(identifier) {
            return Ok(());
        }

        if let Some(pos) = self.stack.iter().position(|s| s == identifier) {
            let mut path = self.stack[pos..].to_vec();
            path.push(identifier.to_string());
            return Err(DumpError::CyclicDependency { path }.into());
        }

        let table = self.provider.table_name_of(identifier)?;
        let edges = self.provider.associations_of(identifier)?;

        self.stack.push(identifier.to_string());

        let mut dependencies: Vec<String> = Vec::new();

        for edge in edges.iter().filter(|e| e.is_data_dependency()) {
            let target_table = self.provider.table_name_of(&edge.target_identifier)?;

            if self.exclusions.contains(&target_table) {
                return Err(DumpError::ExcludedDependency {
                    excluded: target_table,
                    dependent: table,
                }
                .into());
            }

            if let Some(join_table) = edge.owned_join_table() {
                self.record_join_table(join_table);
            }

            // Rows of a self-referencing table are written in a single pass
            if edge.target_identifier == identifier {
                continue;
            }

            self.resolve(&edge.target_identifier)?;

            if !dependencies.contains(&edge.target_identifier) {
                dependencies.push(edge.target_identifier.clone());
            }
        }

        self.stack.pop();

        self.nodes.insert(
            identifier.to_string(),
            DependencyNode {
                identifier: identifier.to_string(),
                table,
                dependencies,
            },
        );

        Ok(())
    }

    fn record_join_table(&mut self, table: &str) {
        if self.exclusions.contains(table) {
            log::debug!("Join table {} is excluded", table);
            return;
        }

        if self.recorded_join_tables.insert(table.to_string()) {
            log::debug!("Recorded join table {}", table);
            self.join_tables.push(JoinTableEntry {
                table: table.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AssociationKind;
    use crate::source::memory::MemorySource;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn excluding(tables: &[&str]) -> ExclusionSet {
        tables.iter().copied().collect()
    }

    fn library() -> MemorySource {
        MemorySource::new()
            .entity("Author", "authors")
            .entity("Book", "books")
            .entity("Tag", "tags")
            .owns("Book", "Author")
            .many_to_many("Book", "Tag", "book_tag")
            // Inverse side of Book.author, no ordering constraint
            .edge("Author", "Book", AssociationKind::ToMany, false, None, None)
    }

    #[test]
    fn test_owning_edge_becomes_child() {
        let source = library();
        let tree =
            build_dependency_tree(&ids(&["Author", "Book", "Tag"]), &ExclusionSet::new(), &source)
                .unwrap();

        assert_eq!(tree.roots, ids(&["Author", "Book", "Tag"]));
        assert_eq!(tree.node("Book").unwrap().dependencies, ids(&["Author", "Tag"]));
        assert!(tree.node("Author").unwrap().dependencies.is_empty());
        assert_eq!(tree.node("Book").unwrap().table, "books");
    }

    #[test]
    fn test_join_table_recorded_once() {
        let source = library()
            .entity("Shelf", "shelves")
            .many_to_many("Shelf", "Tag", "book_tag")
            .many_to_many("Shelf", "Book", "shelf_book");

        let tree = build_dependency_tree(
            &ids(&["Author", "Book", "Shelf", "Tag"]),
            &ExclusionSet::new(),
            &source,
        )
        .unwrap();

        let tables: Vec<_> = tree.join_tables.iter().map(|j| j.table.as_str()).collect();
        assert_eq!(tables, vec!["book_tag", "shelf_book"]);
    }

    #[test]
    fn test_non_owning_many_to_many_records_nothing() {
        let source = MemorySource::new()
            .entity("Tag", "tags")
            .entity("Book", "books")
            .edge(
                "Tag",
                "Book",
                AssociationKind::ManyToMany,
                false,
                None,
                Some("book_tag"),
            );

        let tree = build_dependency_tree(&ids(&["Tag"]), &ExclusionSet::new(), &source).unwrap();

        assert!(tree.join_tables.is_empty());
        assert!(tree.node("Tag").unwrap().dependencies.is_empty());
        assert!(tree.node("Book").is_none());
    }

    #[test]
    fn test_bidirectional_inverse_is_followed() {
        let source = MemorySource::new()
            .entity("Profile", "profiles")
            .entity("User", "users")
            .edge("Profile", "User", AssociationKind::ToOne, false, Some("profile"), None);

        let tree = build_dependency_tree(&ids(&["Profile"]), &ExclusionSet::new(), &source).unwrap();

        assert_eq!(tree.node("Profile").unwrap().dependencies, ids(&["User"]));
    }

    #[test]
    fn test_excluded_dependency_fails() {
        let source = library();
        let err = build_dependency_tree(
            &ids(&["Author", "Book", "Tag"]),
            &excluding(&["authors"]),
            &source,
        )
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<DumpError>(),
            Some(&DumpError::ExcludedDependency {
                excluded: "authors".to_string(),
                dependent: "books".to_string(),
            })
        );
    }

    #[test]
    fn test_excluding_a_leaf_dependent_is_fine() {
        let source = library();
        let tree = build_dependency_tree(
            &ids(&["Author", "Book", "Tag"]),
            &excluding(&["books"]),
            &source,
        )
        .unwrap();

        assert_eq!(tree.roots, ids(&["Author", "Tag"]));
        assert!(tree.node("Book").is_none());
        assert!(tree.join_tables.is_empty());
    }

    #[test]
    fn test_excluding_an_unreferenced_entity_is_fine() {
        let source = library().entity("Log", "logs");
        let tree = build_dependency_tree(
            &ids(&["Author", "Book", "Log", "Tag"]),
            &excluding(&["logs"]),
            &source,
        )
        .unwrap();

        assert_eq!(tree.roots, ids(&["Author", "Book", "Tag"]));
        assert!(tree.node("Log").is_none());
        assert_eq!(tree.join_tables.len(), 1);
    }

    #[test]
    fn test_excluded_join_table_not_recorded() {
        let source = library();
        let tree = build_dependency_tree(
            &ids(&["Author", "Book", "Tag"]),
            &excluding(&["book_tag"]),
            &source,
        )
        .unwrap();

        assert!(tree.join_tables.is_empty());
        assert_eq!(tree.node("Book").unwrap().dependencies, ids(&["Author", "Tag"]));
    }

    #[test]
    fn test_cycle_is_reported_with_path() {
        let source = MemorySource::new()
            .entity("A", "a")
            .entity("B", "b")
            .entity("C", "c")
            .owns("A", "B")
            .owns("B", "C")
            .owns("C", "A");

        let err = build_dependency_tree(&ids(&["A"]), &ExclusionSet::new(), &source).unwrap_err();

        assert_eq!(
            err.downcast_ref::<DumpError>(),
            Some(&DumpError::CyclicDependency {
                path: ids(&["A", "B", "C", "A"]),
            })
        );
    }

    #[test]
    fn test_self_reference_ignored() {
        let source = MemorySource::new()
            .entity("Employee", "employees")
            .owns("Employee", "Employee");

        let tree = build_dependency_tree(&ids(&["Employee"]), &ExclusionSet::new(), &source).unwrap();

        assert!(tree.node("Employee").unwrap().dependencies.is_empty());
    }

    #[test]
    fn test_shared_dependency_memoized() {
        let source = MemorySource::new()
            .entity("Country", "countries")
            .entity("City", "cities")
            .entity("Person", "people")
            .owns("City", "Country")
            .owns("Person", "City")
            .owns("Person", "Country");

        let tree = build_dependency_tree(
            &ids(&["Person", "City", "Country"]),
            &ExclusionSet::new(),
            &source,
        )
        .unwrap();

        assert_eq!(tree.nodes.len(), 3);
        assert_eq!(tree.node("Person").unwrap().dependencies, ids(&["City", "Country"]));
    }

    #[test]
    fn test_unknown_target_propagates() {
        let source = MemorySource::new().entity("Book", "books").owns("Book", "Ghost");

        let err = build_dependency_tree(&ids(&["Book"]), &ExclusionSet::new(), &source).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DumpError>(),
            Some(DumpError::UnknownEntity { identifier }) if identifier == "Ghost"
        ));
    }
}
