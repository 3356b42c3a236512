//! SQLite-backed schema introspection and row fetching

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};
use std::str::FromStr;
use tokio::runtime::Runtime;

use super::{RowSource, SchemaIntrospector};
use crate::model::{Row, TableDescriptor, Value};

/// Synchronous facade over a single-connection sqlx pool
///
/// Every call blocks on a private current-thread runtime, so calls run to
/// completion one after another. Must not be used from inside another
/// tokio runtime.
pub struct SqliteSource {
    runtime: Runtime,
    pool: SqlitePool,
}

impl SqliteSource {
    /// Connect to `url` (e.g. `sqlite://app.db` or `sqlite::memory:`)
    pub fn connect(url: &str) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start database runtime")?;

        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database URL: {}", url))?;

        // One connection: keeps `sqlite::memory:` databases alive and shared
        let pool = runtime
            .block_on(
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options),
            )
            .with_context(|| format!("Failed to connect to database: {}", url))?;

        log::debug!("Connected to {}", url);

        Ok(Self { runtime, pool })
    }

    /// Run a multi-statement SQL script
    pub fn execute_script(&self, sql: &str) -> Result<()> {
        self.runtime
            .block_on(sqlx::raw_sql(sql).execute(&self.pool))
            .context("Failed to execute SQL script")?;
        Ok(())
    }
}

impl SchemaIntrospector for SqliteSource {
    fn list_tables(&self) -> Result<Vec<TableDescriptor>> {
        let rows = self
            .runtime
            .block_on(
                sqlx::query(
                    r#"
                    SELECT name FROM sqlite_master
                    WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
                    ORDER BY rowid
                    "#,
                )
                .fetch_all(&self.pool),
            )
            .context("Failed to list tables")?;

        let mut tables = Vec::new();
        for row in rows {
            tables.push(TableDescriptor::new(row.try_get::<String, _>("name")?));
        }

        Ok(tables)
    }

    fn to_ddl(&self) -> Result<Vec<String>> {
        let rows = self
            .runtime
            .block_on(
                sqlx::query(
                    r#"
                    SELECT sql FROM sqlite_master
                    WHERE type IN ('table', 'index')
                      AND sql IS NOT NULL
                      AND name NOT LIKE 'sqlite_%'
                    ORDER BY CASE type WHEN 'table' THEN 0 ELSE 1 END, rowid
                    "#,
                )
                .fetch_all(&self.pool),
            )
            .context("Failed to read schema")?;

        let mut statements = Vec::new();
        for row in rows {
            statements.push(row.try_get::<String, _>("sql")?);
        }

        Ok(statements)
    }
}

impl RowSource for SqliteSource {
    fn fetch_all(&self, table: &str) -> Result<Vec<Row>> {
        let sql = format!("SELECT * FROM \"{}\"", table.replace('"', "\"\""));

        let rows = self
            .runtime
            .block_on(sqlx::query(&sql).fetch_all(&self.pool))
            .with_context(|| format!("Failed to fetch rows from '{}'", table))?;

        rows.iter().map(decode_row).collect()
    }
}

/// Decode each column by the storage class of the value it holds
fn decode_row(row: &SqliteRow) -> Result<Row> {
    let mut decoded = Row::new();

    for (idx, column) in row.columns().iter().enumerate() {
        let storage = {
            let raw = row.try_get_raw(idx)?;
            if raw.is_null() {
                None
            } else {
                Some(raw.type_info().name().to_string())
            }
        };

        let value = match storage.as_deref() {
            None => Value::Null,
            Some("INTEGER") | Some("BOOLEAN") => Value::Int(row.try_get::<i64, _>(idx)?),
            Some("REAL") | Some("NUMERIC") => Value::Float(row.try_get::<f64, _>(idx)?),
            Some("BLOB") => Value::Bytes(row.try_get::<Vec<u8>, _>(idx)?),
            Some(_) => Value::String(row.try_get::<String, _>(idx)?),
        };

        decoded.push(column.name(), value);
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SqliteSource {
        let source = SqliteSource::connect("sqlite::memory:").unwrap();
        source
            .execute_script(
                r#"
                CREATE TABLE authors (id INTEGER PRIMARY KEY, name TEXT NOT NULL, rating REAL, avatar BLOB);
                CREATE TABLE books (id INTEGER PRIMARY KEY, author_id INTEGER REFERENCES authors(id), title TEXT);
                CREATE INDEX idx_books_author ON books(author_id);
                INSERT INTO authors VALUES (1, 'O''Brien', 4.5, X'CAFE');
                INSERT INTO authors VALUES (2, 'Plain', NULL, NULL);
                "#,
            )
            .unwrap();
        source
    }

    #[test]
    fn test_list_tables_in_creation_order() {
        let source = seeded();
        let names: Vec<_> = source
            .list_tables()
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["authors", "books"]);
    }

    #[test]
    fn test_ddl_lists_tables_before_indexes() {
        let source = seeded();
        let ddl = source.to_ddl().unwrap();
        assert_eq!(ddl.len(), 3);
        assert!(ddl[0].starts_with("CREATE TABLE authors"));
        assert!(ddl[1].starts_with("CREATE TABLE books"));
        assert!(ddl[2].starts_with("CREATE INDEX idx_books_author"));
    }

    #[test]
    fn test_fetch_decodes_storage_classes() {
        let source = seeded();
        let rows = source.fetch_all("authors").unwrap();
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        let names: Vec<_> = first.field_names().collect();
        assert_eq!(names, vec!["id", "name", "rating", "avatar"]);
        assert_eq!(first.get("id"), Some(&Value::Int(1)));
        assert_eq!(first.get("name"), Some(&Value::String("O'Brien".to_string())));
        assert_eq!(first.get("rating"), Some(&Value::Float(4.5)));
        assert_eq!(first.get("avatar"), Some(&Value::Bytes(vec![0xCA, 0xFE])));

        assert_eq!(rows[1].get("rating"), Some(&Value::Null));
    }

    #[test]
    fn test_fetch_empty_table() {
        let source = seeded();
        assert!(source.fetch_all("books").unwrap().is_empty());
    }

    #[test]
    fn test_fetch_missing_table_errors() {
        let source = seeded();
        assert!(source.fetch_all("nope").is_err());
    }
}
