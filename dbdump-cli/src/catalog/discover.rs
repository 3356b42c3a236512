//! Directory walk mapping files to entity identifiers
//!
//! Every regular file below the root becomes one identifier: the namespace
//! path (root namespace + sub-directories) joined with the file stem.
//! Entries are visited in lexicographic order so dumps are reproducible
//! across platforms.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DumpError;

/// Separator between namespace segments in entity identifiers
pub const NAMESPACE_SEPARATOR: &str = "::";

/// One discovered entity: its identifier and the descriptor file defining it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredEntity {
    pub identifier: String,
    pub path: PathBuf,
}

pub struct EntityCatalog;

impl EntityCatalog {
    /// Ordered entity identifiers found below `root`
    pub fn discover(root: &Path, namespace: &str) -> Result<Vec<String>> {
        Ok(Self::discover_files(root, namespace)?
            .into_iter()
            .map(|e| e.identifier)
            .collect())
    }

    /// Like [`EntityCatalog::discover`], keeping the file path of each entity
    pub fn discover_files(root: &Path, namespace: &str) -> Result<Vec<DiscoveredEntity>> {
        if !root.exists() {
            return Err(DumpError::NotFound {
                path: root.to_path_buf(),
            }
            .into());
        }

        let mut found = Vec::new();
        walk(root, namespace, &mut found)?;

        log::info!("Discovered {} entities under {}", found.len(), root.display());
        Ok(found)
    }
}

fn walk(dir: &Path, namespace: &str, found: &mut Vec<DiscoveredEntity>) -> Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<_>>()
        .with_context(|| format!("Failed to list directory: {}", dir.display()))?;

    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        // Hidden files (.gitignore, editor swap files) are not mappings
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if path.is_dir() {
            walk(&path, &join(namespace, &name), found)?;
        } else {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or(name);
            found.push(DiscoveredEntity {
                identifier: join(namespace, &stem),
                path,
            });
        }
    }

    Ok(())
}

fn join(namespace: &str, segment: &str) -> String {
    if namespace.is_empty() {
        segment.to_string()
    } else {
        format!("{}{}{}", namespace, NAMESPACE_SEPARATOR, segment)
    }
}
