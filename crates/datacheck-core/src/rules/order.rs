use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    errors::RuleError,
    results::Verdict,
    rules::{column_index, sample, Rule, MAX_SAMPLES},
    table::Table,
    types::Cell,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(alias = "ascending", alias = "asc")]
    Ascending,
    #[serde(alias = "descending", alias = "desc")]
    Descending,
}

/// Where `Null` cells may appear in a sorted column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NullPlacement {
    #[serde(alias = "first")]
    First,
    #[serde(alias = "last")]
    Last,
}

/// Adjacent non-null cells of `column` never step against `order`; ties are fine.
///
/// Without `nulls`, any `Null` in the column is a violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortOrderCheck {
    pub column: String,
    pub order: SortOrder,
    #[serde(default)]
    pub nulls: Option<NullPlacement>,
}

impl SortOrderCheck {
    pub fn new(column: impl Into<String>, order: SortOrder) -> Self {
        Self {
            column: column.into(),
            order,
            nulls: None,
        }
    }

    pub fn with_nulls(mut self, nulls: NullPlacement) -> Self {
        self.nulls = Some(nulls);
        self
    }

    fn in_order(&self, previous: &Cell, current: &Cell) -> bool {
        match (self.order, current.compare(previous)) {
            (_, None) => false,
            (SortOrder::Ascending, Some(ord)) => ord != Ordering::Less,
            (SortOrder::Descending, Some(ord)) => ord != Ordering::Greater,
        }
    }

    /// Rows breaking the order, top to bottom.
    pub fn violations<'a>(&self, table: &'a Table) -> Result<Vec<(usize, &'a Cell)>, RuleError> {
        let idx = column_index(table, &self.column)?;
        let mut violations = Vec::new();
        let mut previous: Option<&Cell> = None;
        let mut seen_null = false;

        for (i, row) in table.rows().enumerate() {
            let cell = &row[idx];
            if cell.is_null() {
                let allowed = match self.nulls {
                    None => false,
                    Some(NullPlacement::First) => previous.is_none(),
                    Some(NullPlacement::Last) => true,
                };
                if !allowed {
                    violations.push((i, cell));
                }
                seen_null = true;
                continue;
            }
            if seen_null && self.nulls == Some(NullPlacement::Last) {
                violations.push((i, cell));
            } else if let Some(prev) = previous {
                if !self.in_order(prev, cell) {
                    violations.push((i, cell));
                }
            }
            previous = Some(cell);
        }
        Ok(violations)
    }
}

impl Rule for SortOrderCheck {
    fn name(&self) -> &'static str {
        "SortOrderCheck"
    }

    fn validate(&self, primary: &Table, _reference: Option<&Table>) -> Result<Verdict, RuleError> {
        let violations = self.violations(primary)?;
        let direction = match self.order {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        };
        match violations.first() {
            None => Ok(Verdict::pass(format!(
                "data is sorted by {} ({})",
                self.column, direction
            ))),
            Some((row, value)) => Ok(Verdict::fail(format!(
                "row {}: out-of-order value {}",
                row, value
            ))
            .with_details(json!({
                "first_row": row,
                "violations": violations.len(),
                "samples": violations
                    .iter()
                    .take(MAX_SAMPLES)
                    .map(|(i, c)| sample(*i, c))
                    .collect::<Vec<_>>(),
            }))),
        }
    }
}
