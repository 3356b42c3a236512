//! OpenDocument spreadsheet package (`.ods`)
//!
//! A zip archive whose first entry is the uncompressed `mimetype`, followed
//! by `content.xml` and `META-INF/manifest.xml`.

use anyhow::{Context, Result};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::Workbook;
use super::spreadsheet_xml::XmlOut;
use super::workbook::cell_text;
use crate::model::Value;

const MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";
const ODF_VERSION: &str = "1.2";

mod ns {
    pub const OFFICE: &str = "urn:oasis:names:tc:opendocument:xmlns:office:1.0";
    pub const TABLE: &str = "urn:oasis:names:tc:opendocument:xmlns:table:1.0";
    pub const TEXT: &str = "urn:oasis:names:tc:opendocument:xmlns:text:1.0";
    pub const MANIFEST: &str = "urn:oasis:names:tc:opendocument:xmlns:manifest:1.0";
}

pub fn render(workbook: &Workbook) -> Result<Vec<u8>> {
    let stored = entry_options(CompressionMethod::Stored);
    let deflated = entry_options(CompressionMethod::Deflated);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    zip.start_file("mimetype", stored)?;
    zip.write_all(MIMETYPE.as_bytes())?;

    zip.start_file("content.xml", deflated)?;
    zip.write_all(&content(workbook)?)?;

    zip.start_file("META-INF/manifest.xml", deflated)?;
    zip.write_all(&manifest()?)?;

    let cursor = zip.finish().context("Failed to finish ods archive")?;
    Ok(cursor.into_inner())
}

/// Fixed timestamp so repeated dumps are byte-identical
fn entry_options(method: CompressionMethod) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(method)
        .last_modified_time(DateTime::default())
}

fn content(workbook: &Workbook) -> Result<Vec<u8>> {
    let mut xml = XmlOut::new()?;

    xml.start(
        "office:document-content",
        &[
            ("xmlns:office", ns::OFFICE),
            ("xmlns:table", ns::TABLE),
            ("xmlns:text", ns::TEXT),
            ("office:version", ODF_VERSION),
        ],
    )?;
    xml.start("office:body", &[])?;
    xml.start("office:spreadsheet", &[])?;

    for sheet in &workbook.sheets {
        xml.start("table:table", &[("table:name", sheet.title.as_str())])?;

        xml.start("table:table-row", &[])?;
        for name in &sheet.header {
            cell(&mut xml, &[("office:value-type", "string")], name)?;
        }
        xml.end("table:table-row")?;

        for values in &sheet.rows {
            xml.start("table:table-row", &[])?;
            for value in values {
                write_value(&mut xml, value)?;
            }
            xml.end("table:table-row")?;
        }

        xml.end("table:table")
            .with_context(|| format!("Failed to write sheet {}", sheet.title))?;
    }

    xml.end("office:spreadsheet")?;
    xml.end("office:body")?;
    xml.end("office:document-content")?;
    Ok(xml.finish())
}

fn write_value(xml: &mut XmlOut, value: &Value) -> Result<()> {
    let text = cell_text(value);
    match value {
        Value::Null => xml.empty("table:table-cell", &[]),
        Value::Int(_) => cell(
            xml,
            &[("office:value-type", "float"), ("office:value", text.as_str())],
            &text,
        ),
        Value::Float(f) if f.is_finite() => cell(
            xml,
            &[("office:value-type", "float"), ("office:value", text.as_str())],
            &text,
        ),
        Value::Bool(b) => cell(
            xml,
            &[
                ("office:value-type", "boolean"),
                ("office:boolean-value", if *b { "true" } else { "false" }),
            ],
            if *b { "TRUE" } else { "FALSE" },
        ),
        _ => cell(xml, &[("office:value-type", "string")], &text),
    }
}

fn cell(xml: &mut XmlOut, attrs: &[(&str, &str)], text: &str) -> Result<()> {
    xml.start("table:table-cell", attrs)?;
    xml.element("text:p", &[], text)?;
    xml.end("table:table-cell")
}

fn manifest() -> Result<Vec<u8>> {
    let mut xml = XmlOut::new()?;

    xml.start(
        "manifest:manifest",
        &[("xmlns:manifest", ns::MANIFEST), ("manifest:version", ODF_VERSION)],
    )?;
    xml.empty(
        "manifest:file-entry",
        &[
            ("manifest:full-path", "/"),
            ("manifest:version", ODF_VERSION),
            ("manifest:media-type", MIMETYPE),
        ],
    )?;
    xml.empty(
        "manifest:file-entry",
        &[
            ("manifest:full-path", "content.xml"),
            ("manifest:media-type", "text/xml"),
        ],
    )?;
    xml.end("manifest:manifest")?;

    Ok(xml.finish())
}
