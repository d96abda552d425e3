//! Expectation compilation.
//!
//! Converts a loosely typed [`RuleInvocation`] (rule name plus a parameter
//! map, as read from a configuration document) into a typed [`Expectation`]
//! for exactly one rule of the closed catalog. Unknown rule names, unknown or
//! mistyped fields and meaningless parameters all surface as
//! [`ExpectationError`]; nothing is silently ignored.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

#[cfg(test)]
mod tests;

use crate::{
    errors::ExpectationError,
    rules::{
        AllowedValuesCheck, NullAbsenceCheck, PatternCheck, RowCountCheck, RowCountDeltaCheck,
        Rule, RuleKind, SchemaCheck, SortOrderCheck, TextCaseCheck, UniquenessCheck,
        UniquenessDeltaCheck,
    },
};

/// One requested check: a rule name and its raw parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleInvocation {
    pub rule: String,
    #[serde(default)]
    pub params: Value,
}

impl RuleInvocation {
    pub fn new(rule: impl Into<String>, params: Value) -> Self {
        Self {
            rule: rule.into(),
            params,
        }
    }
}

impl From<Expectation> for RuleInvocation {
    fn from(expectation: Expectation) -> Self {
        let rule = expectation.kind().canonical_name().to_string();
        let params = match &expectation {
            Expectation::Schema(r) => serde_json::to_value(r),
            Expectation::RowCount(r) => serde_json::to_value(r),
            Expectation::NullAbsence(r) => serde_json::to_value(r),
            Expectation::Uniqueness(r) => serde_json::to_value(r),
            Expectation::TextCase(r) => serde_json::to_value(r),
            Expectation::SortOrder(r) => serde_json::to_value(r),
            Expectation::AllowedValues(r) => serde_json::to_value(r),
            Expectation::Pattern(r) => serde_json::to_value(r),
            Expectation::RowCountDelta(r) => serde_json::to_value(r),
            Expectation::UniquenessDelta(r) => serde_json::to_value(r),
        };
        Self {
            rule,
            params: params.unwrap_or_default(),
        }
    }
}

/// Typed parameters for one rule, one variant per rule kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    Schema(SchemaCheck),
    RowCount(RowCountCheck),
    NullAbsence(NullAbsenceCheck),
    Uniqueness(UniquenessCheck),
    TextCase(TextCaseCheck),
    SortOrder(SortOrderCheck),
    AllowedValues(AllowedValuesCheck),
    Pattern(PatternCheck),
    RowCountDelta(RowCountDeltaCheck),
    UniquenessDelta(UniquenessDeltaCheck),
}

impl Expectation {
    pub fn kind(&self) -> RuleKind {
        match self {
            Expectation::Schema(_) => RuleKind::Schema,
            Expectation::RowCount(_) => RuleKind::RowCount,
            Expectation::NullAbsence(_) => RuleKind::NullAbsence,
            Expectation::Uniqueness(_) => RuleKind::Uniqueness,
            Expectation::TextCase(_) => RuleKind::TextCase,
            Expectation::SortOrder(_) => RuleKind::SortOrder,
            Expectation::AllowedValues(_) => RuleKind::AllowedValues,
            Expectation::Pattern(_) => RuleKind::Pattern,
            Expectation::RowCountDelta(_) => RuleKind::RowCountDelta,
            Expectation::UniquenessDelta(_) => RuleKind::UniquenessDelta,
        }
    }

    pub fn as_rule(&self) -> &dyn Rule {
        match self {
            Expectation::Schema(r) => r,
            Expectation::RowCount(r) => r,
            Expectation::NullAbsence(r) => r,
            Expectation::Uniqueness(r) => r,
            Expectation::TextCase(r) => r,
            Expectation::SortOrder(r) => r,
            Expectation::AllowedValues(r) => r,
            Expectation::Pattern(r) => r,
            Expectation::RowCountDelta(r) => r,
            Expectation::UniquenessDelta(r) => r,
        }
    }

    fn parse(kind: RuleKind, params: Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            RuleKind::Schema => Expectation::Schema(from_params(params)?),
            RuleKind::RowCount => Expectation::RowCount(from_params(params)?),
            RuleKind::NullAbsence => Expectation::NullAbsence(from_params(params)?),
            RuleKind::Uniqueness => Expectation::Uniqueness(from_params(params)?),
            RuleKind::TextCase => Expectation::TextCase(from_params(params)?),
            RuleKind::SortOrder => Expectation::SortOrder(from_params(params)?),
            RuleKind::AllowedValues => Expectation::AllowedValues(from_params(params)?),
            RuleKind::Pattern => Expectation::Pattern(from_params(params)?),
            RuleKind::RowCountDelta => Expectation::RowCountDelta(from_params(params)?),
            RuleKind::UniquenessDelta => Expectation::UniquenessDelta(from_params(params)?),
        })
    }

    /// Reject parameters that are well-typed but cannot describe a real check.
    fn check_parameters(&self) -> Result<(), String> {
        match self {
            Expectation::Schema(r) if r.required_columns.is_empty() && !r.exact => {
                Err("requiredColumns must not be empty".to_string())
            }
            Expectation::RowCount(r) if r.min > r.max => {
                Err(format!("min {} is greater than max {}", r.min, r.max))
            }
            Expectation::RowCountDelta(r) if r.min > r.max => {
                Err(format!("min {} is greater than max {}", r.min, r.max))
            }
            Expectation::NullAbsence(r) if r.columns.is_empty() => {
                Err("columns must not be empty".to_string())
            }
            Expectation::Uniqueness(UniquenessCheck { columns: Some(c) })
            | Expectation::UniquenessDelta(UniquenessDeltaCheck { columns: Some(c) })
                if c.is_empty() =>
            {
                Err("columns must not be empty; omit it to use every column".to_string())
            }
            Expectation::AllowedValues(r) if r.values.is_empty() => {
                Err("values must not be empty".to_string())
            }
            Expectation::Pattern(r) => r.compile().map(|_| ()).map_err(|e| e.to_string()),
            _ => Ok(()),
        }
    }
}

fn from_params<T: DeserializeOwned>(params: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(params)
}

/// Type-check an invocation against its rule's declared parameters.
pub fn compile(invocation: &RuleInvocation) -> Result<Expectation, ExpectationError> {
    let kind = RuleKind::from_name(&invocation.rule)
        .ok_or_else(|| ExpectationError::UnknownRule(invocation.rule.clone()))?;

    let params = match &invocation.params {
        Value::Null => Value::Object(Map::new()),
        Value::Object(_) => invocation.params.clone(),
        other => {
            return Err(ExpectationError::Malformed {
                rule: invocation.rule.clone(),
                message: format!("parameters must be a map, found {}", other),
            })
        }
    };

    let expectation =
        Expectation::parse(kind, params).map_err(|e| ExpectationError::Malformed {
            rule: invocation.rule.clone(),
            message: e.to_string(),
        })?;
    expectation
        .check_parameters()
        .map_err(|message| ExpectationError::Invalid {
            rule: invocation.rule.clone(),
            message,
        })?;
    Ok(expectation)
}
