pub mod formatters;
pub mod utils;

use std::fmt;

use datacheck_core::{Overall, Report, Summary};
pub use formatters::{json::JsonFormatter, stdout::StdOutFormatter, table::TableFormatter};

/// Which side of a before/after comparison a loaded table plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    Dataset,
    Reference,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableRole::Dataset => f.write_str("dataset"),
            TableRole::Reference => f.write_str("reference"),
        }
    }
}

/// Lifecycle hooks of one validation run, called in order by the CLI.
pub trait Reporter {
    fn on_start(&self);
    fn on_loading(&self);
    fn on_table_load(&mut self, role: TableRole, path: &str, rows: usize);
    fn on_validation_start(&self);
    fn on_report(&mut self, report: &Report);
    fn on_summary(&self, summary: Summary, overall: Overall);
}
