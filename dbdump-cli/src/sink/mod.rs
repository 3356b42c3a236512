//! Destinations receiving table contents
//!
//! Both dump modes walk tables the same way; only the sink differs.

mod sql;
mod tabular;

pub use sql::SqlSink;
pub use tabular::TabularSink;

use anyhow::Result;

use crate::model::Row;
use crate::source::RowSource;

/// Receives the rows of one table at a time
pub trait DumpSink {
    fn write_table(&mut self, table: &str, rows: &[Row]) -> Result<()>;

    /// Fetch `table` from `source` and write it; empty tables are skipped
    fn dump_table(&mut self, table: &str, source: &dyn RowSource) -> Result<()> {
        let rows = source.fetch_all(table)?;
        if rows.is_empty() {
            log::info!("Skipping empty table {}", table);
            return Ok(());
        }
        self.write_table(table, &rows)
    }
}

/// Hand each table to `sink` in order
pub fn dump_tables(tables: &[&str], source: &dyn RowSource, sink: &mut dyn DumpSink) -> Result<()> {
    for table in tables {
        sink.dump_table(table, source)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::MemorySource;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(String, usize)>,
    }

    impl DumpSink for Recorder {
        fn write_table(&mut self, table: &str, rows: &[Row]) -> Result<()> {
            self.seen.push((table.to_string(), rows.len()));
            Ok(())
        }
    }

    #[test]
    fn test_tables_visited_in_order_skipping_empty() {
        let source = MemorySource::new()
            .table("b", vec![Row::new().with("id", 1i64)])
            .table("empty", vec![])
            .table("a", vec![Row::new().with("id", 1i64), Row::new().with("id", 2i64)]);
        let mut sink = Recorder::default();

        dump_tables(&["b", "empty", "a"], &source, &mut sink).unwrap();

        assert_eq!(sink.seen, vec![("b".to_string(), 1), ("a".to_string(), 2)]);
    }

    #[test]
    fn test_fetch_error_stops_walk() {
        let source = MemorySource::new()
            .table("a", vec![Row::new().with("id", 1i64)])
            .table("b", vec![Row::new().with("id", 1i64)])
            .failing("a");
        let mut sink = Recorder::default();

        assert!(dump_tables(&["a", "b"], &source, &mut sink).is_err());
        assert!(sink.seen.is_empty());
    }
}
