//! Rule library.
//!
//! Every rule is a pure function of the primary table, the optional reference
//! table and its own parameters. Rules never mutate their inputs and never
//! depend on other rules, so any subset may run in any order.

pub mod generic;
pub mod order;
pub mod relations;
pub mod schema;
pub mod string;

use std::fmt;

use crate::{errors::RuleError, results::Verdict, table::Table, types::Cell};

pub use generic::{NullAbsenceCheck, RowCountCheck, UniquenessCheck};
pub use order::{NullPlacement, SortOrder, SortOrderCheck};
pub use relations::{RowCountDeltaCheck, UniquenessDeltaCheck};
pub use schema::SchemaCheck;
pub use string::{AllowedValuesCheck, LetterCase, PatternCheck, TextCaseCheck};

/// Maximum number of offending rows listed in a result's details.
pub const MAX_SAMPLES: usize = 10;

pub trait Rule: Send + Sync {
    /// Canonical rule name.
    fn name(&self) -> &'static str;
    /// Evaluate the rule. `Err` means the rule could not be evaluated.
    fn validate(&self, primary: &Table, reference: Option<&Table>) -> Result<Verdict, RuleError>;
}

/// The closed catalog of rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Schema,
    RowCount,
    NullAbsence,
    Uniqueness,
    TextCase,
    SortOrder,
    AllowedValues,
    Pattern,
    RowCountDelta,
    UniquenessDelta,
}

impl RuleKind {
    pub const ALL: [RuleKind; 10] = [
        RuleKind::Schema,
        RuleKind::RowCount,
        RuleKind::NullAbsence,
        RuleKind::Uniqueness,
        RuleKind::TextCase,
        RuleKind::SortOrder,
        RuleKind::AllowedValues,
        RuleKind::Pattern,
        RuleKind::RowCountDelta,
        RuleKind::UniquenessDelta,
    ];

    /// Look a rule up by canonical name or alias (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.canonical_name() == name || k.alias() == name)
    }

    pub fn canonical_name(&self) -> &'static str {
        match self {
            RuleKind::Schema => "SchemaCheck",
            RuleKind::RowCount => "RowCountCheck",
            RuleKind::NullAbsence => "NullAbsenceCheck",
            RuleKind::Uniqueness => "UniquenessCheck",
            RuleKind::TextCase => "TextCaseCheck",
            RuleKind::SortOrder => "SortOrderCheck",
            RuleKind::AllowedValues => "AllowedValuesCheck",
            RuleKind::Pattern => "PatternCheck",
            RuleKind::RowCountDelta => "RowCountDeltaCheck",
            RuleKind::UniquenessDelta => "UniquenessDeltaCheck",
        }
    }

    pub fn alias(&self) -> &'static str {
        match self {
            RuleKind::Schema => "Schema",
            RuleKind::RowCount => "RowCount",
            RuleKind::NullAbsence => "NoNulls",
            RuleKind::Uniqueness => "Unique",
            RuleKind::TextCase => "TextCase",
            RuleKind::SortOrder => "SortOrder",
            RuleKind::AllowedValues => "AllowedValues",
            RuleKind::Pattern => "Pattern",
            RuleKind::RowCountDelta => "RowCountDelta",
            RuleKind::UniquenessDelta => "UniquenessDelta",
        }
    }

    pub fn needs_reference(&self) -> bool {
        matches!(self, RuleKind::RowCountDelta | RuleKind::UniquenessDelta)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

pub(crate) fn column_index(table: &Table, column: &str) -> Result<usize, RuleError> {
    table
        .column_index(column)
        .ok_or_else(|| RuleError::ColumnNotFound(column.to_string()))
}

pub(crate) fn require_reference(reference: Option<&Table>) -> Result<&Table, RuleError> {
    reference.ok_or(RuleError::MissingReference)
}

/// `(row, value)` sample for result details.
pub(crate) fn sample(row: usize, cell: &Cell) -> serde_json::Value {
    serde_json::json!({ "row": row, "value": cell.to_json() })
}
