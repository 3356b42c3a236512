//! Workbook dump: one sheet per included, non-empty table

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use super::OutputFile;
use crate::model::ExclusionSet;
use crate::sink::{TabularSink, dump_tables};
use crate::source::{RowSource, SchemaIntrospector};
use crate::tabular::{TabularFormat, render};

pub struct TabularDumper<'a> {
    schema: &'a dyn SchemaIntrospector,
    rows: &'a dyn RowSource,
}

impl<'a> TabularDumper<'a> {
    pub fn new(schema: &'a dyn SchemaIntrospector, rows: &'a dyn RowSource) -> Self {
        Self { schema, rows }
    }

    /// Write every table not in `exclusions` to a workbook at `path`
    ///
    /// The container format follows the file extension; an unsupported or
    /// missing extension fails before the file is created.
    pub fn dump(&self, path: &Path, exclusions: &ExclusionSet, overwrite: bool) -> Result<()> {
        let format = TabularFormat::from_path(path)?;
        let mut out = OutputFile::open(path, overwrite)?;

        let tables: Vec<String> = self
            .schema
            .list_tables()?
            .into_iter()
            .map(|t| t.name)
            .filter(|name| !exclusions.contains(name))
            .collect();
        let tables: Vec<&str> = tables.iter().map(|s| s.as_str()).collect();

        let mut sink = TabularSink::new();
        dump_tables(&tables, self.rows, &mut sink)?;
        let workbook = sink.into_workbook();

        let bytes = render(&workbook, format)?;
        out.write_all(&bytes)
            .with_context(|| format!("Failed to write workbook: {}", out.path().display()))?;

        log::info!(
            "Saved {} sheets as {} to {}",
            workbook.sheets.len(),
            format.extension(),
            out.path().display()
        );
        out.finish()
    }
}
