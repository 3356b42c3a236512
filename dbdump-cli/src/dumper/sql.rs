//! SQL script dump: schema followed by dependency-ordered INSERT blocks

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::OutputFile;
use crate::catalog::EntityCatalog;
use crate::emit::StatementEmitter;
use crate::graph::{WriteOrder, build_dependency_tree, order};
use crate::model::ExclusionSet;
use crate::sink::{SqlSink, dump_tables};
use crate::source::{EntityMetadataProvider, RowSource, SchemaIntrospector};

/// Where entity mapping descriptors live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRoot {
    pub path: PathBuf,
    pub namespace: String,
}

impl EntityRoot {
    pub fn new(path: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            namespace: namespace.into(),
        }
    }
}

/// Discover the entities under `root` and compute their write order
pub fn plan_write_order(
    root: &EntityRoot,
    exclusions: &ExclusionSet,
    metadata: &dyn EntityMetadataProvider,
) -> Result<WriteOrder> {
    let identifiers = EntityCatalog::discover(&root.path, &root.namespace)?;
    let tree = build_dependency_tree(&identifiers, exclusions, metadata)?;
    Ok(order(&tree))
}

/// Writes `.sql` dumps that can be replayed into an empty database
pub struct SqlDumper<'a> {
    schema: &'a dyn SchemaIntrospector,
    rows: &'a dyn RowSource,
    metadata: &'a dyn EntityMetadataProvider,
    entities: EntityRoot,
    emitter: StatementEmitter,
}

impl<'a> SqlDumper<'a> {
    pub fn new(
        schema: &'a dyn SchemaIntrospector,
        rows: &'a dyn RowSource,
        metadata: &'a dyn EntityMetadataProvider,
        entities: EntityRoot,
    ) -> Self {
        Self {
            schema,
            rows,
            metadata,
            entities,
            emitter: StatementEmitter::default(),
        }
    }

    pub fn with_emitter(mut self, emitter: StatementEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    /// Write schema and data to `path`
    ///
    /// The schema section is written before ordering is computed, so an
    /// exclusion conflict leaves a file holding only the schema.
    pub fn dump(&self, path: &Path, exclusions: &ExclusionSet, overwrite: bool) -> Result<()> {
        let mut out = OutputFile::open(path, overwrite)?;
        self.write_dump(&mut out, exclusions)?;
        out.finish()
    }

    /// Write schema and data to an already opened destination
    pub fn write_dump<W: Write + ?Sized>(&self, out: &mut W, exclusions: &ExclusionSet) -> Result<()> {
        self.write_schema(out)?;

        let order = self.plan(exclusions)?;
        let tables = order.tables();
        log::info!("Dumping {} tables", tables.len());

        let mut sink = SqlSink::new(self.emitter, out);
        dump_tables(&tables, self.rows, &mut sink)
    }

    /// Write only the schema section to `path`
    pub fn dump_schema(&self, path: &Path, overwrite: bool) -> Result<()> {
        let mut out = OutputFile::open(path, overwrite)?;
        self.write_schema(&mut out)?;
        out.finish()
    }

    /// Discover entities and compute the table write order
    pub fn plan(&self, exclusions: &ExclusionSet) -> Result<WriteOrder> {
        plan_write_order(&self.entities, exclusions, self.metadata)
    }

    fn write_schema<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let statements = self.schema.to_ddl()?;

        let mut section = String::new();
        for statement in &statements {
            section.push_str(statement);
            section.push_str(";\n");
        }
        section.push_str("\n\n");

        out.write_all(section.as_bytes())
            .context("Failed to write schema")?;

        log::info!("Wrote {} schema statements", statements.len());
        Ok(())
    }
}
