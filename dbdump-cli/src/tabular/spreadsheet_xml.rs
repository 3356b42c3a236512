//! Excel 2003 XML Spreadsheet (SpreadsheetML), written for `.xls`
//!
//! Also hosts the small quick-xml wrapper shared with the OpenDocument writer.

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};

use super::Workbook;
use super::workbook::cell_text;
use crate::model::Value;

const SPREADSHEET_NS: &str = "urn:schemas-microsoft-com:office:spreadsheet";

/// Indented XML document builder
pub(super) struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    pub(super) fn new() -> Result<Self> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 1);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(Self { writer })
    }

    /// `<?content?>`
    pub(super) fn instruction(&mut self, content: &str) -> Result<()> {
        self.writer.write_event(Event::PI(BytesPI::new(content)))?;
        Ok(())
    }

    pub(super) fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let tag = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(tag))?;
        Ok(())
    }

    pub(super) fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    pub(super) fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let tag = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Empty(tag))?;
        Ok(())
    }

    /// `<name attrs>text</name>`
    pub(super) fn element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.start(name, attrs)?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    pub(super) fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

pub fn render(workbook: &Workbook) -> Result<Vec<u8>> {
    let mut xml = XmlOut::new()?;
    // Marks the document as an Excel workbook
    xml.instruction("mso-application progid=\"Excel.Sheet\"")?;

    xml.start(
        "Workbook",
        &[("xmlns", SPREADSHEET_NS), ("xmlns:ss", SPREADSHEET_NS)],
    )?;

    for sheet in &workbook.sheets {
        xml.start("Worksheet", &[("ss:Name", sheet.title.as_str())])?;
        xml.start("Table", &[])?;

        xml.start("Row", &[])?;
        for name in &sheet.header {
            xml.start("Cell", &[])?;
            xml.element("Data", &[("ss:Type", "String")], name)?;
            xml.end("Cell")?;
        }
        xml.end("Row")?;

        for values in &sheet.rows {
            xml.start("Row", &[])?;
            for value in values {
                match cell_type(value) {
                    None => xml.empty("Cell", &[])?,
                    Some(kind) => {
                        xml.start("Cell", &[])?;
                        xml.element("Data", &[("ss:Type", kind)], &data_text(value))?;
                        xml.end("Cell")?;
                    }
                }
            }
            xml.end("Row")?;
        }

        xml.end("Table")?;
        xml.end("Worksheet")
            .with_context(|| format!("Failed to write sheet {}", sheet.title))?;
    }

    xml.end("Workbook")?;
    Ok(xml.finish())
}

fn cell_type(value: &Value) -> Option<&'static str> {
    match value {
        Value::Null => None,
        Value::Bool(_) => Some("Boolean"),
        Value::Int(_) => Some("Number"),
        Value::Float(f) if f.is_finite() => Some("Number"),
        _ => Some("String"),
    }
}

fn data_text(value: &Value) -> String {
    match value {
        Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
        other => cell_text(other),
    }
}
