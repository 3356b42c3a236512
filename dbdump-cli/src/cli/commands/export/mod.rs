//! `export` command

mod handler;

use clap::Args;
use std::path::PathBuf;

pub use handler::handle_export_command;

#[derive(Debug, Args)]
pub struct ExportCommands {
    /// Destination workbook; extension selects the format (xlsx, xls, ods, html)
    pub file: PathBuf,

    /// Table to leave out (repeatable)
    #[arg(short = 'x', long)]
    pub exclude: Vec<String>,

    /// Replace the destination if it exists
    #[arg(long)]
    pub overwrite: bool,
}
