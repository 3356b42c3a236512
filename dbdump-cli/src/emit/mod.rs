//! SQL statement generation

pub mod literal;
pub mod statement;

pub use literal::{EscapeStyle, format_value, quote_identifier};
pub use statement::{BATCH_SIZE, StatementEmitter};
