//! SQL literal and identifier formatting

use serde::Deserialize;

use crate::model::Value;

/// How quotes inside string literals are escaped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EscapeStyle {
    /// C-style backslash escapes (`O\'Brien`), as understood by MySQL
    #[default]
    Backslash,
    /// Standard SQL doubled quotes (`O''Brien`), for SQLite and PostgreSQL
    Doubled,
}

/// Render a value as a SQL literal
pub fn format_value(value: &Value, style: EscapeStyle) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
        Value::Int(i) => i.to_string(),
        // NaN and infinities have no SQL spelling
        Value::Float(f) if !f.is_finite() => "NULL".to_string(),
        // Debug keeps the fractional part of whole numbers (1.0, not 1)
        Value::Float(f) => format!("{:?}", f),
        Value::String(s) => quote_string(s, style),
        Value::Bytes(b) => format!("X'{}'", Value::hex(b)),
    }
}

fn quote_string(s: &str, style: EscapeStyle) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    match style {
        EscapeStyle::Backslash => {
            for c in s.chars() {
                match c {
                    '\'' => out.push_str("\\'"),
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    '\0' => out.push_str("\\0"),
                    _ => out.push(c),
                }
            }
        }
        EscapeStyle::Doubled => {
            for c in s.chars() {
                if c == '\'' {
                    out.push('\'');
                }
                out.push(c);
            }
        }
    }
    out.push('\'');
    out
}

/// Backtick-quote a table or column name
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
