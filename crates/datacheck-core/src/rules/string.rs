use std::{collections::HashSet, fmt};

use regex::{Regex, RegexBuilder};
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
pub enum LetterCase {
    #[serde(alias = "lower", alias = "lowercase")]
    Lower,
    #[serde(alias = "upper", alias = "uppercase")]
    Upper,
}

impl LetterCase {
    fn holds(&self, s: &str) -> bool {
        match self {
            LetterCase::Lower => s.to_lowercase() == s,
            LetterCase::Upper => s.to_uppercase() == s,
        }
    }
}

impl fmt::Display for LetterCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LetterCase::Lower => f.write_str("lowercase"),
            LetterCase::Upper => f.write_str("uppercase"),
        }
    }
}

/// Every non-null text cell equals its own lower/upper transform.
///
/// Numeric cells carry no letters and are skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextCaseCheck {
    pub column: String,
    pub case: LetterCase,
}

impl TextCaseCheck {
    pub fn new(column: impl Into<String>, case: LetterCase) -> Self {
        Self {
            column: column.into(),
            case,
        }
    }
}

impl Rule for TextCaseCheck {
    fn name(&self) -> &'static str {
        "TextCaseCheck"
    }

    fn validate(&self, primary: &Table, _reference: Option<&Table>) -> Result<Verdict, RuleError> {
        let idx = column_index(primary, &self.column)?;
        let offending: Vec<(usize, &Cell)> = primary
            .rows()
            .enumerate()
            .filter_map(|(i, row)| match &row[idx] {
                Cell::Text(s) if !self.case.holds(s) => Some((i, &row[idx])),
                _ => None,
            })
            .collect();

        if offending.is_empty() {
            return Ok(Verdict::pass(format!(
                "all {} values are {}",
                self.column, self.case
            )));
        }
        Ok(Verdict::fail(format!(
            "{}: {} value(s) not {}",
            self.column,
            offending.len(),
            self.case
        ))
        .with_details(json!({
            "violations": offending.len(),
            "samples": offending
                .iter()
                .take(MAX_SAMPLES)
                .map(|(i, c)| sample(*i, c))
                .collect::<Vec<_>>(),
        })))
    }
}

/// Every non-null cell's textual form belongs to `values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AllowedValuesCheck {
    pub column: String,
    pub values: Vec<String>,
    #[serde(default, alias = "ignore_case")]
    pub ignore_case: bool,
}

impl AllowedValuesCheck {
    pub fn new<I: IntoIterator<Item = S>, S: Into<String>>(
        column: impl Into<String>,
        values: I,
    ) -> Self {
        Self {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
            ignore_case: false,
        }
    }

    pub fn ignoring_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    fn normalize(&self, s: &str) -> String {
        if self.ignore_case {
            s.to_lowercase()
        } else {
            s.to_string()
        }
    }
}

impl Rule for AllowedValuesCheck {
    fn name(&self) -> &'static str {
        "AllowedValuesCheck"
    }

    fn validate(&self, primary: &Table, _reference: Option<&Table>) -> Result<Verdict, RuleError> {
        let idx = column_index(primary, &self.column)?;
        let members: HashSet<String> = self.values.iter().map(|v| self.normalize(v)).collect();

        let offending: Vec<(usize, &Cell)> = primary
            .rows()
            .enumerate()
            .map(|(i, row)| (i, &row[idx]))
            .filter(|(_, c)| !c.is_null() && !members.contains(&self.normalize(&c.to_string())))
            .collect();

        if offending.is_empty() {
            return Ok(Verdict::pass(format!(
                "all {} values in allowed set",
                self.column
            )));
        }
        let unexpected: Vec<String> = offending
            .iter()
            .map(|(_, c)| c.to_string())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        Ok(Verdict::fail(format!(
            "{}: {} value(s) not in allowed set",
            self.column,
            offending.len()
        ))
        .with_details(json!({
            "violations": offending.len(),
            "unexpected": unexpected,
            "samples": offending
                .iter()
                .take(MAX_SAMPLES)
                .map(|(i, c)| sample(*i, c))
                .collect::<Vec<_>>(),
        })))
    }
}

/// Every non-null cell's textual form matches a regular expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct PatternCheck {
    pub column: String,
    pub pattern: String,
    #[serde(default, alias = "case_insensitive")]
    pub case_insensitive: bool,
}

impl PatternCheck {
    pub fn new(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            pattern: pattern.into(),
            case_insensitive: false,
        }
    }

    pub fn compile(&self) -> Result<Regex, RuleError> {
        RegexBuilder::new(&self.pattern)
            .case_insensitive(self.case_insensitive)
            .build()
            .map_err(|e| RuleError::InvalidPattern {
                pattern: self.pattern.clone(),
                message: e.to_string(),
            })
    }
}

impl Rule for PatternCheck {
    fn name(&self) -> &'static str {
        "PatternCheck"
    }

    fn validate(&self, primary: &Table, _reference: Option<&Table>) -> Result<Verdict, RuleError> {
        let regex = self.compile()?;
        let idx = column_index(primary, &self.column)?;

        let offending: Vec<(usize, &Cell)> = primary
            .rows()
            .enumerate()
            .map(|(i, row)| (i, &row[idx]))
            .filter(|(_, c)| !c.is_null() && !regex.is_match(&c.to_string()))
            .collect();

        if offending.is_empty() {
            return Ok(Verdict::pass(format!(
                "all {} values match {}",
                self.column, self.pattern
            )));
        }
        Ok(Verdict::fail(format!(
            "{}: {} value(s) do not match {}",
            self.column,
            offending.len(),
            self.pattern
        ))
        .with_details(json!({
            "violations": offending.len(),
            "samples": offending
                .iter()
                .take(MAX_SAMPLES)
                .map(|(i, c)| sample(*i, c))
                .collect::<Vec<_>>(),
        })))
    }
}
