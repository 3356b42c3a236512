use anyhow::Result;
use std::io::Write;

use super::DumpSink;
use crate::emit::StatementEmitter;
use crate::model::Row;
use crate::source::RowSource;

/// Writes INSERT blocks to a text stream
pub struct SqlSink<'w, W: Write + ?Sized> {
    emitter: StatementEmitter,
    out: &'w mut W,
}

impl<'w, W: Write + ?Sized> SqlSink<'w, W> {
    pub fn new(emitter: StatementEmitter, out: &'w mut W) -> Self {
        Self { emitter, out }
    }
}

impl<W: Write + ?Sized> DumpSink for SqlSink<'_, W> {
    fn write_table(&mut self, table: &str, rows: &[Row]) -> Result<()> {
        self.emitter.write_rows(table, rows, &mut *self.out)
    }

    fn dump_table(&mut self, table: &str, source: &dyn RowSource) -> Result<()> {
        self.emitter.emit_inserts(table, source, &mut *self.out)
    }
}
