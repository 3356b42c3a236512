//! Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::{DumpCommands, ExportCommands, PlanCommands, SchemaCommands};

#[derive(Debug, Parser)]
#[command(name = "dbdump", version, about = "Dependency-ordered database dumps")]
pub struct Cli {
    /// Configuration file (defaults to ./dbdump.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database URL, overrides config and DATABASE_URL
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Dump schema and data as a SQL script
    Dump(DumpCommands),
    /// Dump only the schema as a SQL script
    Schema(SchemaCommands),
    /// Dump table contents to a workbook (xlsx, xls, ods, html)
    Export(ExportCommands),
    /// Print the table write order without writing anything
    Plan(PlanCommands),
}

impl Cli {
    /// Log filter matching the requested verbosity
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
