//! Output container selection by file extension

use anyhow::Result;
use std::path::Path;

use crate::error::DumpError;

/// Supported workbook containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularFormat {
    Xlsx,
    Xls,
    Ods,
    Html,
}

impl TabularFormat {
    pub const ACCEPTED: [&'static str; 4] = ["xlsx", "xls", "ods", "html"];

    /// Pick the format from the extension of `path` (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let Some(extension) = path.extension() else {
            return Err(DumpError::MissingExtension {
                path: path.to_path_buf(),
                accepted: Self::ACCEPTED.to_vec(),
            }
            .into());
        };

        let extension = extension.to_string_lossy().to_lowercase();
        match extension.as_str() {
            "xlsx" => Ok(TabularFormat::Xlsx),
            "xls" => Ok(TabularFormat::Xls),
            "ods" => Ok(TabularFormat::Ods),
            "html" => Ok(TabularFormat::Html),
            _ => Err(DumpError::UnknownFormat {
                extension,
                accepted: Self::ACCEPTED.to_vec(),
            }
            .into()),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            TabularFormat::Xlsx => "xlsx",
            TabularFormat::Xls => "xls",
            TabularFormat::Ods => "ods",
            TabularFormat::Html => "html",
        }
    }
}
