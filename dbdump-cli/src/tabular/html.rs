//! Write a workbook as an HTML document, one table per sheet

use quick_xml::escape::escape;

use super::Workbook;
use super::workbook::cell_text;

pub fn render(workbook: &Workbook) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Database dump</title>\n</head>\n<body>\n",
    );

    for sheet in &workbook.sheets {
        html.push_str(&format!("<h2>{}</h2>\n<table border=\"1\">\n", escape(&sheet.title)));

        html.push_str("<thead><tr>");
        for name in &sheet.header {
            html.push_str(&format!("<th>{}</th>", escape(name)));
        }
        html.push_str("</tr></thead>\n<tbody>\n");

        for values in &sheet.rows {
            html.push_str("<tr>");
            for value in values {
                html.push_str(&format!("<td>{}</td>", escape(&cell_text(value))));
            }
            html.push_str("</tr>\n");
        }

        html.push_str("</tbody>\n</table>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}
