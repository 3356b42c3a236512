//! `dump` and `schema` commands

mod handler;

use clap::Args;
use std::path::PathBuf;

use crate::emit::EscapeStyle;

pub use handler::{handle_dump_command, handle_schema_command};

#[derive(Debug, Args)]
pub struct DumpCommands {
    /// Destination .sql file
    pub file: PathBuf,

    /// Table to leave out (repeatable)
    #[arg(short = 'x', long)]
    pub exclude: Vec<String>,

    /// Replace the destination if it exists
    #[arg(long)]
    pub overwrite: bool,

    /// Directory holding entity mapping descriptors
    #[arg(long)]
    pub entities: Option<PathBuf>,

    /// Namespace prefix for entity identifiers
    #[arg(long)]
    pub namespace: Option<String>,

    /// String literal escaping
    #[arg(long, value_enum)]
    pub escape: Option<EscapeStyle>,
}

#[derive(Debug, Args)]
pub struct SchemaCommands {
    /// Destination .sql file
    pub file: PathBuf,

    /// Replace the destination if it exists
    #[arg(long)]
    pub overwrite: bool,
}
