//! Workbook export: one sheet per table
//!
//! Sheets are collected into a format-neutral [`Workbook`] and rendered by
//! the writer matching the destination's extension.

pub mod format;
mod html;
mod ods;
mod spreadsheet_xml;
pub mod workbook;
mod xlsx;

pub use format::TabularFormat;
pub use workbook::{Sheet, Workbook};

use anyhow::Result;

/// Render `workbook` in `format`
pub fn render(workbook: &Workbook, format: TabularFormat) -> Result<Vec<u8>> {
    match format {
        TabularFormat::Xlsx => xlsx::render(workbook),
        TabularFormat::Xls => spreadsheet_xml::render(workbook),
        TabularFormat::Ods => ods::render(workbook),
        TabularFormat::Html => Ok(html::render(workbook).into_bytes()),
    }
}
