//! Depth-first post-order over the dependency tree

use serde::Serialize;
use std::collections::HashSet;

use super::{DependencyNode, DependencyTree, JoinTableEntry};

/// Entity table in commit order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OrderedEntity {
    pub identifier: String,
    pub table: String,
}

/// Commit order: entity tables first, then join tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteOrder {
    pub entities: Vec<OrderedEntity>,
    pub join_tables: Vec<JoinTableEntry>,
}

impl WriteOrder {
    /// Every table to fill, in order, each table once
    ///
    /// Entities sharing a table keep the position of the first one.
    pub fn tables(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entities
            .iter()
            .map(|e| e.table.as_str())
            .chain(self.join_tables.iter().map(|j| j.table.as_str()))
            .filter(|t| seen.insert(*t))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.join_tables.is_empty()
    }
}

/// Compute the write order for `tree`
///
/// Roots are visited in discovery order; every dependency is emitted before
/// its dependents. Deduplication is by `(identifier, table)` value.
pub fn order(tree: &DependencyTree) -> WriteOrder {
    let mut entities = Vec::new();
    let mut called: HashSet<OrderedEntity> = HashSet::new();

    for root in &tree.roots {
        if let Some(node) = tree.node(root) {
            visit(tree, node, &mut called, &mut entities);
        }
    }

    let order = WriteOrder {
        entities,
        join_tables: tree.join_tables.clone(),
    };

    log::debug!("Write order: {}", order.tables().join(", "));
    order
}

fn visit(
    tree: &DependencyTree,
    node: &DependencyNode,
    called: &mut HashSet<OrderedEntity>,
    entities: &mut Vec<OrderedEntity>,
) {
    let entry = OrderedEntity {
        identifier: node.identifier.clone(),
        table: node.table.clone(),
    };

    if !called.insert(entry.clone()) {
        return;
    }

    for dependency in &node.dependencies {
        if let Some(child) = tree.node(dependency) {
            visit(tree, child, called, entities);
        }
    }

    entities.push(entry);
}
