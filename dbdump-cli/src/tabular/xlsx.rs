//! Write a workbook as .xlsx

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};

use super::Workbook;
use crate::model::Value;

/// Largest magnitude an f64 cell holds without rounding
const MAX_EXACT_INT: u64 = 1 << 53;

pub fn render(workbook: &Workbook) -> Result<Vec<u8>> {
    let mut book = XlsxWorkbook::new();
    let header_format = Format::new().set_bold();

    for sheet in &workbook.sheets {
        let worksheet = book.add_worksheet();
        worksheet
            .set_name(&sheet.title)
            .with_context(|| format!("Invalid sheet name: {}", sheet.title))?;

        // Header
        for (col, name) in sheet.header.iter().enumerate() {
            let col = column(col, &sheet.title)?;
            worksheet.write_string_with_format(0, col, name, &header_format)?;
        }

        // Data rows start below the header
        for (row_idx, values) in sheet.rows.iter().enumerate() {
            let row = u32::try_from(row_idx + 1)
                .with_context(|| format!("Too many rows in sheet {}", sheet.title))?;
            for (col, value) in values.iter().enumerate() {
                let col = column(col, &sheet.title)?;
                write_value(worksheet, row, col, value)
                    .with_context(|| format!("Failed to write cell in sheet {}", sheet.title))?;
            }
        }

        worksheet.autofit();
    }

    book.save_to_buffer().context("Failed to build xlsx workbook")
}

fn column(index: usize, title: &str) -> Result<u16> {
    u16::try_from(index).with_context(|| format!("Too many columns in sheet {}", title))
}

fn write_value(ws: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<()> {
    match value {
        Value::Null => { /* Leave cell empty */ }
        Value::Bool(b) => { ws.write_boolean(row, col, *b)?; }
        Value::Int(i) if i.unsigned_abs() > MAX_EXACT_INT => {
            ws.write_string(row, col, i.to_string())?;
        }
        Value::Int(i) => { ws.write_number(row, col, *i as f64)?; }
        Value::Float(f) => { ws.write_number(row, col, *f)?; }
        Value::String(s) => { ws.write_string(row, col, s)?; }
        Value::Bytes(b) => { ws.write_string(row, col, Value::hex(b))?; }
    }
    Ok(())
}
