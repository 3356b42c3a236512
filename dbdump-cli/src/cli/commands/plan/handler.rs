//! Write order inspection

use anyhow::{Context, Result};
use colored::*;

use super::PlanCommands;
use crate::catalog::TomlMappingProvider;
use crate::cli::commands::{entity_root, exclusions};
use crate::config::Config;
use crate::dumper::plan_write_order;
use crate::graph::WriteOrder;

/// Handle `dbdump plan`
///
/// Needs only the mapping descriptors, no database connection.
pub fn handle_plan_command(args: PlanCommands, config: &Config) -> Result<()> {
    let root = entity_root(config, args.entities, args.namespace);
    let metadata = TomlMappingProvider::load(&root.path, &root.namespace)
        .with_context(|| format!("Failed to load entity mappings from {}", root.path.display()))?;
    let exclude = exclusions(config, &args.exclude);

    let write_order = plan_write_order(&root, &exclude, &metadata)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&write_order).context("Failed to format JSON output")?
        );
    } else {
        print!("{}", format_plan(&write_order));
    }

    Ok(())
}

fn format_plan(write_order: &WriteOrder) -> String {
    if write_order.is_empty() {
        return "No tables to dump\n".to_string();
    }

    let mut out = String::new();
    let mut position = 1;

    for entity in &write_order.entities {
        out.push_str(&format!(
            "{:>3}. {} {}\n",
            position,
            entity.table.bold(),
            format!("({})", entity.identifier).dimmed()
        ));
        position += 1;
    }

    for join in &write_order.join_tables {
        out.push_str(&format!(
            "{:>3}. {} {}\n",
            position,
            join.table.bold(),
            "(join table)".dimmed()
        ));
        position += 1;
    }

    out
}
