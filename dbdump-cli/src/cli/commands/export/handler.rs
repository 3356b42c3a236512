//! Workbook export command handler

use anyhow::{Context, Result};
use colored::*;

use super::ExportCommands;
use crate::cli::commands::{exclusions, open_database};
use crate::config::Config;
use crate::dumper::TabularDumper;

/// Handle `dbdump export`
pub fn handle_export_command(args: ExportCommands, config: &Config, database: Option<&str>) -> Result<()> {
    let source = open_database(config, database)?;
    let exclude = exclusions(config, &args.exclude);

    TabularDumper::new(&source, &source)
        .dump(&args.file, &exclude, args.overwrite)
        .with_context(|| format!("Export to {} failed", args.file.display()))?;

    println!(
        "Tables exported to {}",
        args.file.display().to_string().bright_green()
    );
    Ok(())
}
