//! Format-neutral workbook model

use crate::model::{Row, Value};

/// One sheet: a header row and data rows below it
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Sheet {
    /// Build a sheet from table rows; `None` when there are no rows
    pub fn from_rows(title: &str, rows: &[Row]) -> Option<Self> {
        let first = rows.first()?;

        Some(Self {
            title: title.to_string(),
            header: first.field_names().map(|s| s.to_string()).collect(),
            rows: rows.iter().map(|r| r.values().cloned().collect()).collect(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }
}

/// Cell text for formats without typed cells
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bytes(b) => Value::hex(b),
        other => other.to_string(),
    }
}
