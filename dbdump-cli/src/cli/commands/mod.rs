//! Subcommand arguments and handlers

pub mod dump;
pub mod export;
pub mod plan;

use anyhow::Result;
use std::path::PathBuf;

pub use dump::{DumpCommands, SchemaCommands};
pub use export::ExportCommands;
pub use plan::PlanCommands;

use crate::config::Config;
use crate::dumper::EntityRoot;
use crate::model::ExclusionSet;
use crate::source::SqliteSource;

/// Open the configured database, preferring the CLI override
pub(crate) fn open_database(config: &Config, database: Option<&str>) -> Result<SqliteSource> {
    let url = match database {
        Some(url) => url,
        None => config.require_database_url()?,
    };
    SqliteSource::connect(url)
}

/// Config exclusions plus those given on the command line
pub(crate) fn exclusions(config: &Config, extra: &[String]) -> ExclusionSet {
    let mut set: ExclusionSet = config.dump.exclude.iter().cloned().collect();
    set.extend(extra.iter().cloned());
    set
}

pub(crate) fn entity_root(config: &Config, root: Option<PathBuf>, namespace: Option<String>) -> EntityRoot {
    EntityRoot::new(
        root.unwrap_or_else(|| config.entities.root.clone()),
        namespace.unwrap_or_else(|| config.entities.namespace.clone()),
    )
}
