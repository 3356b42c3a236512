//! `plan` command

mod handler;

use clap::Args;
use std::path::PathBuf;

pub use handler::handle_plan_command;

#[derive(Debug, Args)]
pub struct PlanCommands {
    /// Table to leave out (repeatable)
    #[arg(short = 'x', long)]
    pub exclude: Vec<String>,

    /// Directory holding entity mapping descriptors
    #[arg(long)]
    pub entities: Option<PathBuf>,

    /// Namespace prefix for entity identifiers
    #[arg(long)]
    pub namespace: Option<String>,

    /// Print the order as JSON
    #[arg(long)]
    pub json: bool,
}
