//! Dump orchestration: schema, ordering and table contents

mod output;
mod sql;
mod tabular;

pub use output::OutputFile;
pub use sql::{EntityRoot, SqlDumper, plan_write_order};
pub use tabular::TabularDumper;
