use anyhow::Result;

use super::DumpSink;
use crate::model::Row;
use crate::tabular::{Sheet, Workbook};

/// Collects one sheet per non-empty table
#[derive(Debug, Default)]
pub struct TabularSink {
    workbook: Workbook,
}

impl TabularSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_workbook(self) -> Workbook {
        self.workbook
    }
}

impl DumpSink for TabularSink {
    fn write_table(&mut self, table: &str, rows: &[Row]) -> Result<()> {
        if let Some(sheet) = Sheet::from_rows(table, rows) {
            log::info!("Added sheet {} ({} rows)", table, sheet.rows.len());
            self.workbook.push(sheet);
        }
        Ok(())
    }
}
