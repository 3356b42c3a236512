//! Batched INSERT statements for one table

use anyhow::{Context, Result};
use std::io::Write;

use super::{EscapeStyle, format_value, quote_identifier};
use crate::model::Row;
use crate::source::RowSource;

/// Rows per INSERT statement
pub const BATCH_SIZE: usize = 10;

/// Turns table rows into `INSERT INTO ... VALUES` blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementEmitter {
    style: EscapeStyle,
}

impl StatementEmitter {
    pub fn new(style: EscapeStyle) -> Self {
        Self { style }
    }

    /// Fetch every row of `table` and write its INSERT statements to `out`
    ///
    /// Fetch errors are returned as-is; nothing is written for an empty table.
    pub fn emit_inserts<W: Write + ?Sized>(
        &self,
        table: &str,
        source: &dyn RowSource,
        out: &mut W,
    ) -> Result<()> {
        let rows = source.fetch_all(table)?;
        self.write_rows(table, &rows, out)
    }

    /// Write INSERT statements for already fetched rows
    pub fn write_rows<W: Write + ?Sized>(&self, table: &str, rows: &[Row], out: &mut W) -> Result<()> {
        let Some(first) = rows.first() else {
            log::info!("Skipping empty table {}", table);
            return Ok(());
        };

        let prefix = insert_prefix(table, first);
        let mut block = format!("-- Fill '{}' table\n", table);

        for batch in rows.chunks(BATCH_SIZE) {
            let tuples: Vec<String> = batch.iter().map(|row| self.tuple(row)).collect();
            block.push_str(&prefix);
            block.push_str(" VALUES\n");
            block.push_str(&tuples.join(",\n"));
            block.push_str(";\n\n");
        }

        out.write_all(block.as_bytes())
            .with_context(|| format!("Failed to write inserts for '{}'", table))?;

        log::info!("Wrote {} rows for {}", rows.len(), table);
        Ok(())
    }

    fn tuple(&self, row: &Row) -> String {
        let values: Vec<String> = row.values().map(|v| format_value(v, self.style)).collect();
        format!("({})", values.join(", "))
    }
}

/// `INSERT INTO `table` (`a`, `b`)` from the first row's field names
fn insert_prefix(table: &str, first: &Row) -> String {
    let columns: Vec<String> = first.field_names().map(quote_identifier).collect();
    format!("INSERT INTO {} ({})", quote_identifier(table), columns.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::MemorySource;

    fn rows(count: i64) -> Vec<Row> {
        (1..=count)
            .map(|i| Row::new().with("id", i).with("name", format!("n{}", i)))
            .collect()
    }

    fn render(table: &str, rows: &[Row]) -> String {
        let mut out = Vec::new();
        StatementEmitter::default().write_rows(table, rows, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_exact_output_for_two_rows() {
        let rows = vec![
            Row::new().with("id", 1i64).with("name", "O'Brien").with("bio", None::<String>),
            Row::new().with("id", 2i64).with("name", "Lee").with("bio", "x"),
        ];

        assert_eq!(
            render("authors", &rows),
            "-- Fill 'authors' table\n\
             INSERT INTO `authors` (`id`, `name`, `bio`) VALUES\n\
             (1, 'O\\'Brien', NULL),\n\
             (2, 'Lee', 'x');\n\n"
        );
    }

    #[test]
    fn test_zero_rows_emit_nothing() {
        assert_eq!(render("empty", &[]), "");
    }

    #[test]
    fn test_ten_rows_one_statement() {
        let output = render("t", &rows(10));
        assert_eq!(output.matches("INSERT INTO").count(), 1);
        assert_eq!(output.matches("(").count() - 1, 10);
        assert_eq!(output.matches(';').count(), 1);
        assert_eq!(output.matches("-- Fill").count(), 1);
    }

    #[test]
    fn test_eleven_rows_two_statements() {
        let output = render("t", &rows(11));
        let statements: Vec<&str> = output
            .split("INSERT INTO")
            .skip(1)
            .collect();

        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].matches("'n").count(), 10);
        assert_eq!(statements[1].matches("'n").count(), 1);
        assert!(statements[1].contains("(11, 'n11');"));
    }

    #[test]
    fn test_twenty_rows_two_full_statements() {
        let output = render("t", &rows(20));
        assert_eq!(output.matches("INSERT INTO").count(), 2);
        assert!(output.contains("(10, 'n10');\n\nINSERT INTO"));
        assert!(output.ends_with("(20, 'n20');\n\n"));
    }

    #[test]
    fn test_emit_inserts_fetches_from_source() {
        let source = MemorySource::new().table("tags", rows(1));
        let mut out = Vec::new();

        StatementEmitter::new(EscapeStyle::Doubled)
            .emit_inserts("tags", &source, &mut out)
            .unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("-- Fill 'tags' table\nINSERT INTO `tags` (`id`, `name`)"));
    }

    #[test]
    fn test_emit_inserts_propagates_fetch_error() {
        let source = MemorySource::new().table("tags", rows(1)).failing("tags");
        let mut out = Vec::new();

        let err = StatementEmitter::default()
            .emit_inserts("tags", &source, &mut out)
            .unwrap_err();

        assert!(err.to_string().contains("connection lost"));
        assert!(out.is_empty());
    }
}
