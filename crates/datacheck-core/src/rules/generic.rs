use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::json;
use xxhash_rust::xxh3::Xxh3DefaultBuilder;

use crate::{
    errors::RuleError,
    results::Verdict,
    rules::{column_index, Rule, MAX_SAMPLES},
    table::Table,
    types::CellKey,
};

/// `min <= rows <= max`, inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowCountCheck {
    pub min: usize,
    pub max: usize,
}

impl RowCountCheck {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl Rule for RowCountCheck {
    fn name(&self) -> &'static str {
        "RowCountCheck"
    }

    fn validate(&self, primary: &Table, _reference: Option<&Table>) -> Result<Verdict, RuleError> {
        let n = primary.num_rows();
        let details = json!({ "row_count": n, "min": self.min, "max": self.max });
        if self.min <= n && n <= self.max {
            Ok(Verdict::pass(format!(
                "row count {} within [{},{}]",
                n, self.min, self.max
            ))
            .with_details(details))
        } else {
            Ok(Verdict::fail(format!(
                "row count {} outside [{},{}]",
                n, self.min, self.max
            ))
            .with_details(details))
        }
    }
}

/// No `Null` cell in any of the named columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NullAbsenceCheck {
    pub columns: Vec<String>,
}

impl NullAbsenceCheck {
    pub fn new<I: IntoIterator<Item = S>, S: Into<String>>(columns: I) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

impl Rule for NullAbsenceCheck {
    fn name(&self) -> &'static str {
        "NullAbsenceCheck"
    }

    fn validate(&self, primary: &Table, _reference: Option<&Table>) -> Result<Verdict, RuleError> {
        let indices = self
            .columns
            .iter()
            .map(|c| column_index(primary, c))
            .collect::<Result<Vec<_>, _>>()?;

        let mut counts = BTreeMap::new();
        let mut samples = BTreeMap::new();
        let mut failures = Vec::new();
        for (column, idx) in self.columns.iter().zip(indices) {
            let null_rows: Vec<usize> = primary
                .rows()
                .enumerate()
                .filter(|(_, row)| row[idx].is_null())
                .map(|(i, _)| i)
                .collect();
            if !null_rows.is_empty() {
                failures.push(format!("{}: {} NULL values found", column, null_rows.len()));
            }
            counts.insert(column.as_str(), null_rows.len());
            samples.insert(
                column.as_str(),
                null_rows.into_iter().take(MAX_SAMPLES).collect::<Vec<_>>(),
            );
        }

        if failures.is_empty() {
            Ok(Verdict::pass(format!(
                "no NULL values in {}",
                self.columns.join(", ")
            )))
        } else {
            Ok(Verdict::fail(failures.join("; "))
                .with_details(json!({ "null_counts": counts, "rows": samples })))
        }
    }
}

/// No two rows are equal when projected onto `columns` (all columns when absent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UniquenessCheck {
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

impl UniquenessCheck {
    pub fn all_columns() -> Self {
        Self { columns: None }
    }

    pub fn on<I: IntoIterator<Item = S>, S: Into<String>>(columns: I) -> Self {
        Self {
            columns: Some(columns.into_iter().map(Into::into).collect()),
        }
    }
}

impl Rule for UniquenessCheck {
    fn name(&self) -> &'static str {
        "UniquenessCheck"
    }

    fn validate(&self, primary: &Table, _reference: Option<&Table>) -> Result<Verdict, RuleError> {
        let scan = DuplicateScan::run(primary, self.columns.as_deref())?;
        if scan.duplicate_rows.is_empty() {
            Ok(Verdict::pass(format!(
                "no duplicate rows (total: {} rows)",
                primary.num_rows()
            )))
        } else {
            let k = scan.duplicate_rows.len();
            Ok(
                Verdict::fail(format!("{} duplicate row(s) found", k)).with_details(json!({
                    "duplicates": k,
                    "distinct": scan.distinct,
                    "rows": scan.duplicate_rows.iter().take(MAX_SAMPLES).collect::<Vec<_>>(),
                })),
            )
        }
    }
}

/// Result of projecting every row onto a column set and hashing it.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateScan {
    /// Number of distinct projected rows
    pub distinct: usize,
    /// Rows whose projection already appeared earlier
    pub duplicate_rows: Vec<usize>,
}

impl DuplicateScan {
    /// Single pass, O(n). `None` projects onto every column.
    pub fn run(table: &Table, columns: Option<&[String]>) -> Result<Self, RuleError> {
        let indices: Vec<usize> = match columns {
            Some(cols) => cols
                .iter()
                .map(|c| column_index(table, c))
                .collect::<Result<_, _>>()?,
            None => (0..table.num_columns()).collect(),
        };

        let mut seen: HashSet<Vec<CellKey<'_>>, Xxh3DefaultBuilder> =
            HashSet::with_capacity_and_hasher(table.num_rows(), Xxh3DefaultBuilder::new());
        let mut duplicate_rows = Vec::new();
        for (i, row) in table.rows().enumerate() {
            let key: Vec<CellKey<'_>> = indices.iter().map(|&j| row[j].key()).collect();
            if !seen.insert(key) {
                duplicate_rows.push(i);
            }
        }
        Ok(Self {
            distinct: seen.len(),
            duplicate_rows,
        })
    }
}
