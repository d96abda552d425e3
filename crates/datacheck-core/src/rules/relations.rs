//! Rules comparing the primary table with the reference ("before") table.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    errors::RuleError,
    results::Verdict,
    rules::{generic::DuplicateScan, require_reference, Rule},
    table::Table,
};

/// `reference rows - primary rows` lies within `[min, max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowCountDeltaCheck {
    pub min: i64,
    pub max: i64,
}

impl RowCountDeltaCheck {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

impl Rule for RowCountDeltaCheck {
    fn name(&self) -> &'static str {
        "RowCountDeltaCheck"
    }

    fn validate(&self, primary: &Table, reference: Option<&Table>) -> Result<Verdict, RuleError> {
        let reference = require_reference(reference)?;
        let before = reference.num_rows() as i64;
        let after = primary.num_rows() as i64;
        let delta = before - after;
        let details = json!({ "reference_rows": before, "rows": after, "delta": delta });
        if self.min <= delta && delta <= self.max {
            Ok(Verdict::pass(format!(
                "row count delta {} within [{},{}] ({} -> {})",
                delta, self.min, self.max, before, after
            ))
            .with_details(details))
        } else {
            Ok(Verdict::fail(format!(
                "row count delta {} outside [{},{}]",
                delta, self.min, self.max
            ))
            .with_details(details))
        }
    }
}

/// The primary table is the reference with exactly its duplicates removed:
/// no duplicates remain and the row count equals the reference's distinct count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UniquenessDeltaCheck {
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

impl UniquenessDeltaCheck {
    pub fn all_columns() -> Self {
        Self { columns: None }
    }
}

impl Rule for UniquenessDeltaCheck {
    fn name(&self) -> &'static str {
        "UniquenessDeltaCheck"
    }

    fn validate(&self, primary: &Table, reference: Option<&Table>) -> Result<Verdict, RuleError> {
        let reference = require_reference(reference)?;
        let before = DuplicateScan::run(reference, self.columns.as_deref())?;
        let after = DuplicateScan::run(primary, self.columns.as_deref())?;
        let n = primary.num_rows();
        let k = after.duplicate_rows.len();
        let details = json!({
            "reference_rows": reference.num_rows(),
            "reference_duplicates": before.duplicate_rows.len(),
            "expected_rows": before.distinct,
            "rows": n,
            "duplicates": k,
        });

        if k == 0 && n == before.distinct {
            Ok(Verdict::pass(format!(
                "{} duplicate row(s) removed ({} -> {})",
                before.duplicate_rows.len(),
                reference.num_rows(),
                n
            ))
            .with_details(details))
        } else {
            Ok(Verdict::fail(format!(
                "expected {} distinct row(s) from reference, found {} row(s) with {} duplicate(s)",
                before.distinct, n, k
            ))
            .with_details(details))
        }
    }
}
