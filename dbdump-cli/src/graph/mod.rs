//! Dependency graph logic for ordering table writes
//!
//! This module provides functions to:
//! - Build a dependency tree from entity association metadata
//! - Collect many-to-many join tables
//! - Produce a write order where referenced tables precede referencing ones

pub mod dependency_graph;
pub mod ordering;

pub use dependency_graph::{DependencyNode, DependencyTree, JoinTableEntry, build_dependency_tree};
pub use ordering::{OrderedEntity, WriteOrder, order};
