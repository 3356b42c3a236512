//! Domain errors raised while preparing or writing a dump
//!
//! Library functions return `anyhow::Result`; these variants travel inside
//! the `anyhow::Error` and can be recovered with `downcast_ref::<DumpError>()`.

use std::path::PathBuf;

/// Errors detected by the dumper itself (as opposed to I/O or database failures)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpError {
    /// Destination exists and overwrite was not requested
    FileConflict { path: PathBuf },
    /// An excluded table is referenced by an included one
    ExcludedDependency { excluded: String, dependent: String },
    /// Associations form a cycle between distinct entities
    CyclicDependency { path: Vec<String> },
    /// Tabular destination has an extension outside the accepted set
    UnknownFormat { extension: String, accepted: Vec<&'static str> },
    /// Tabular destination has no extension at all
    MissingExtension { path: PathBuf, accepted: Vec<&'static str> },
    /// Entity mapping root directory does not exist
    NotFound { path: PathBuf },
    /// An association targets an identifier no mapping describes
    UnknownEntity { identifier: String },
    /// A mapping descriptor is malformed
    InvalidMapping { identifier: String, message: String },
}

impl std::fmt::Display for DumpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DumpError::FileConflict { path } => write!(
                f,
                "'{}' already exists - provide an empty file path or pass --overwrite",
                path.display()
            ),
            DumpError::ExcludedDependency { excluded, dependent } => write!(
                f,
                "table '{}' is excluded but '{}' depends on it - exclude '{}' as well or keep '{}'",
                excluded, dependent, dependent, excluded
            ),
            DumpError::CyclicDependency { path } => {
                write!(f, "circular dependency detected: {}", path.join(" -> "))
            }
            DumpError::UnknownFormat { extension, accepted } => write!(
                f,
                "unknown output format '{}' (accepted: {})",
                extension,
                accepted.join(", ")
            ),
            DumpError::MissingExtension { path, accepted } => write!(
                f,
                "'{}' has no file extension (accepted: {})",
                path.display(),
                accepted.join(", ")
            ),
            DumpError::NotFound { path } => {
                write!(f, "entity directory '{}' does not exist", path.display())
            }
            DumpError::UnknownEntity { identifier } => {
                write!(f, "no mapping found for entity '{}'", identifier)
            }
            DumpError::InvalidMapping { identifier, message } => {
                write!(f, "invalid mapping for '{}': {}", identifier, message)
            }
        }
    }
}

impl std::error::Error for DumpError {}
