//! Dataset validation engine.
//!
//! Loads a delimited text dataset into a typed [`Table`], evaluates an ordered
//! list of rule invocations against it (and optionally against a reference
//! "before" table), and aggregates the outcomes into a [`Report`].
//!
//! ```no_run
//! use datacheck_core::{readers, run, RuleInvocation};
//! use serde_json::json;
//!
//! let table = readers::load("id,name\n1,alice\n2,bob\n")?;
//! let report = run(
//!     &table,
//!     None,
//!     &[
//!         RuleInvocation::new("RowCount", json!({"min": 2, "max": 2})),
//!         RuleInvocation::new("SortOrder", json!({"column": "name", "order": "Ascending"})),
//!     ],
//! );
//! assert!(report.is_passed());
//! # Ok::<(), datacheck_core::LoadError>(())
//! ```

pub mod compiler;
pub mod engine;
pub mod errors;
pub mod inference;
pub mod readers;
pub mod report;
pub mod results;
pub mod rules;
pub mod table;
pub mod types;

pub use compiler::{compile, Expectation, RuleInvocation};
pub use engine::{run, ValidationEngine};
pub use errors::{ExpectationError, LoadError, ParseError, RuleError};
pub use inference::infer_cell_type;
pub use report::{Overall, Report, Summary};
pub use results::{CheckResult, Status};
pub use rules::{Rule, RuleKind};
pub use table::Table;
pub use types::{Cell, CellKind};
