//! SQL dump command handlers

use anyhow::{Context, Result};
use colored::*;

use super::{DumpCommands, SchemaCommands};
use crate::catalog::TomlMappingProvider;
use crate::cli::commands::{entity_root, exclusions, open_database};
use crate::config::Config;
use crate::dumper::{OutputFile, SqlDumper};
use crate::emit::StatementEmitter;

/// Handle `dbdump dump`
///
/// The destination is claimed before mappings are read, so an existing file
/// is reported as a conflict whatever the state of the entity directory.
pub fn handle_dump_command(args: DumpCommands, config: &Config, database: Option<&str>) -> Result<()> {
    let source = open_database(config, database)?;
    let mut out = OutputFile::open(&args.file, args.overwrite)?;

    let root = entity_root(config, args.entities, args.namespace);
    let metadata = TomlMappingProvider::load(&root.path, &root.namespace)
        .with_context(|| format!("Failed to load entity mappings from {}", root.path.display()))?;
    let exclude = exclusions(config, &args.exclude);
    let escape = args.escape.unwrap_or(config.dump.escape);

    SqlDumper::new(&source, &source, &metadata, root)
        .with_emitter(StatementEmitter::new(escape))
        .write_dump(&mut out, &exclude)
        .with_context(|| format!("Dump to {} failed", args.file.display()))?;
    out.finish()?;

    println!(
        "Database dumped to {}",
        args.file.display().to_string().bright_green()
    );
    Ok(())
}

/// Handle `dbdump schema`
pub fn handle_schema_command(args: SchemaCommands, config: &Config, database: Option<&str>) -> Result<()> {
    let source = open_database(config, database)?;
    let root = entity_root(config, None, None);
    let metadata = TomlMappingProvider::default();

    SqlDumper::new(&source, &source, &metadata, root)
        .dump_schema(&args.file, args.overwrite)
        .with_context(|| format!("Schema dump to {} failed", args.file.display()))?;

    println!(
        "Schema dumped to {}",
        args.file.display().to_string().bright_green()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DumpError;
    use std::fs;

    fn dump_args(file: std::path::PathBuf, entities: std::path::PathBuf) -> DumpCommands {
        DumpCommands {
            file,
            exclude: Vec::new(),
            overwrite: false,
            entities: Some(entities),
            namespace: None,
            escape: None,
        }
    }

    #[test]
    fn test_existing_destination_conflicts_before_mappings_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.sql");
        fs::write(&path, "keep me").unwrap();
        let args = dump_args(path.clone(), dir.path().join("no-such-entities"));

        let err = handle_dump_command(args, &Config::default(), Some("sqlite::memory:"))
            .err()
            .unwrap();

        assert_eq!(
            err.downcast_ref::<DumpError>(),
            Some(&DumpError::FileConflict { path: path.clone() })
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn test_missing_entity_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let entities = dir.path().join("no-such-entities");
        let args = dump_args(dir.path().join("dump.sql"), entities.clone());

        let err = handle_dump_command(args, &Config::default(), Some("sqlite::memory:"))
            .err()
            .unwrap();

        assert_eq!(
            err.downcast_ref::<DumpError>(),
            Some(&DumpError::NotFound { path: entities })
        );
    }
}
