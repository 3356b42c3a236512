//! Dependency-ordered relational dumps
//!
//! Reads table contents from a database and writes them either as a SQL
//! script that replays cleanly into an empty schema, or as a workbook with
//! one sheet per table.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod dumper;
pub mod emit;
pub mod error;
pub mod graph;
pub mod model;
pub mod sink;
pub mod source;
pub mod tabular;

pub use error::DumpError;
