use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{errors::RuleError, results::Verdict, rules::Rule, table::Table};

/// Required columns are present in the header, order-independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SchemaCheck {
    #[serde(alias = "required_columns")]
    pub required_columns: BTreeSet<String>,
    /// Also fail on columns that are not required
    #[serde(default)]
    pub exact: bool,
}

impl SchemaCheck {
    pub fn new<I: IntoIterator<Item = S>, S: Into<String>>(required: I) -> Self {
        Self {
            required_columns: required.into_iter().map(Into::into).collect(),
            exact: false,
        }
    }

    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }
}

fn format_set<'a, I: IntoIterator<Item = &'a String>>(names: I) -> String {
    let joined: Vec<&str> = names.into_iter().map(String::as_str).collect();
    format!("{{{}}}", joined.join(", "))
}

impl Rule for SchemaCheck {
    fn name(&self) -> &'static str {
        "SchemaCheck"
    }

    fn validate(&self, primary: &Table, _reference: Option<&Table>) -> Result<Verdict, RuleError> {
        let missing: Vec<&String> = self
            .required_columns
            .iter()
            .filter(|c| !primary.has_column(c))
            .collect();
        let extra: Vec<&String> = if self.exact {
            let mut extra: Vec<&String> = primary
                .columns()
                .iter()
                .filter(|c| !self.required_columns.contains(*c))
                .collect();
            extra.sort();
            extra
        } else {
            Vec::new()
        };

        if missing.is_empty() && extra.is_empty() {
            let message = if self.exact {
                format!("schema matches: {} column(s)", primary.num_columns())
            } else {
                format!(
                    "all {} required column(s) present",
                    self.required_columns.len()
                )
            };
            return Ok(Verdict::pass(message));
        }

        let mut parts = Vec::new();
        if !missing.is_empty() {
            parts.push(format!("missing columns: {}", format_set(missing.iter().copied())));
        }
        if !extra.is_empty() {
            parts.push(format!("extra columns: {}", format_set(extra.iter().copied())));
        }
        Ok(Verdict::fail(parts.join("; ")).with_details(json!({
            "missing": missing,
            "extra": extra,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let rows: Vec<Vec<&str>> = vec![];
        Table::from_raw(&["id", "name", "email"], &rows).unwrap()
    }

    #[test]
    fn test_required_present_any_order() {
        let rule = SchemaCheck::new(["email", "id"]);
        let verdict = rule.validate(&table(), None).unwrap();
        assert!(verdict.passed);
    }

    #[test]
    fn test_missing_columns() {
        let rule = SchemaCheck::new(["salary", "id", "age"]);
        let verdict = rule.validate(&table(), None).unwrap();
        assert!(!verdict.passed);
        assert_eq!(verdict.message, "missing columns: {age, salary}");
    }

    #[test]
    fn test_exact_flags_extra_columns() {
        let rule = SchemaCheck::new(["id", "name"]).exact();
        let verdict = rule.validate(&table(), None).unwrap();
        assert!(!verdict.passed);
        assert_eq!(verdict.message, "extra columns: {email}");
    }

    #[test]
    fn test_exact_match() {
        let rule = SchemaCheck::new(["id", "name", "email"]).exact();
        assert!(rule.validate(&table(), None).unwrap().passed);
    }

    #[test]
    fn test_names_are_exact() {
        let rule = SchemaCheck::new(["Name"]);
        assert!(!rule.validate(&table(), None).unwrap().passed);
    }
}
