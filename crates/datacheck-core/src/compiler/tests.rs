use serde_json::json;

use super::*;
use crate::rules::{LetterCase, NullPlacement, SortOrder};

#[test]
fn test_compile_row_count() {
    let inv = RuleInvocation::new("RowCount", json!({"min": 24, "max": 24}));
    assert_eq!(
        compile(&inv).unwrap(),
        Expectation::RowCount(RowCountCheck::new(24, 24))
    );
}

#[test]
fn test_compile_canonical_name() {
    let inv = RuleInvocation::new("NullAbsenceCheck", json!({"columns": ["age", "salary"]}));
    assert_eq!(
        compile(&inv).unwrap(),
        Expectation::NullAbsence(NullAbsenceCheck::new(["age", "salary"]))
    );
}

#[test]
fn test_compile_schema_camel_and_snake_case() {
    let camel = RuleInvocation::new("Schema", json!({"requiredColumns": ["id", "name"]}));
    let snake = RuleInvocation::new("Schema", json!({"required_columns": ["name", "id"]}));
    assert_eq!(compile(&camel).unwrap(), compile(&snake).unwrap());
}

#[test]
fn test_compile_unique_defaults_to_all_columns() {
    let inv = RuleInvocation::new("Unique", Value::Null);
    assert_eq!(
        compile(&inv).unwrap(),
        Expectation::Uniqueness(UniquenessCheck::all_columns())
    );
}

#[test]
fn test_compile_enum_aliases() {
    let inv = RuleInvocation::new(
        "SortOrder",
        json!({"column": "name", "order": "asc", "nulls": "last"}),
    );
    assert_eq!(
        compile(&inv).unwrap(),
        Expectation::SortOrder(
            SortOrderCheck::new("name", SortOrder::Ascending).with_nulls(NullPlacement::Last)
        )
    );
    let inv = RuleInvocation::new("TextCase", json!({"column": "status", "case": "Lower"}));
    assert_eq!(
        compile(&inv).unwrap(),
        Expectation::TextCase(TextCaseCheck::new("status", LetterCase::Lower))
    );
}

#[test]
fn test_unknown_rule() {
    let inv = RuleInvocation::new("Frobnicate", json!({}));
    assert_eq!(
        compile(&inv).unwrap_err(),
        ExpectationError::UnknownRule("Frobnicate".to_string())
    );
}

#[test]
fn test_wrong_field_type_is_malformed() {
    let inv = RuleInvocation::new("RowCount", json!({"min": "abc", "max": 3}));
    assert!(matches!(
        compile(&inv).unwrap_err(),
        ExpectationError::Malformed { .. }
    ));
}

#[test]
fn test_negative_row_count_is_malformed() {
    let inv = RuleInvocation::new("RowCount", json!({"min": -1, "max": 3}));
    assert!(matches!(
        compile(&inv).unwrap_err(),
        ExpectationError::Malformed { .. }
    ));
}

#[test]
fn test_unknown_field_is_malformed() {
    let inv = RuleInvocation::new("RowCount", json!({"min": 1, "max": 3, "maxx": 4}));
    let err = compile(&inv).unwrap_err();
    assert!(err.to_string().contains("maxx"));
}

#[test]
fn test_missing_field_is_malformed() {
    let inv = RuleInvocation::new("TextCase", json!({"column": "status"}));
    assert!(matches!(
        compile(&inv).unwrap_err(),
        ExpectationError::Malformed { .. }
    ));
}

#[test]
fn test_non_map_params_is_malformed() {
    let inv = RuleInvocation::new("RowCount", json!([1, 2]));
    assert!(matches!(
        compile(&inv).unwrap_err(),
        ExpectationError::Malformed { .. }
    ));
}

#[test]
fn test_min_greater_than_max_is_invalid() {
    let inv = RuleInvocation::new("RowCount", json!({"min": 5, "max": 3}));
    assert!(matches!(
        compile(&inv).unwrap_err(),
        ExpectationError::Invalid { .. }
    ));
}

#[test]
fn test_empty_column_lists_are_invalid() {
    for inv in [
        RuleInvocation::new("NoNulls", json!({"columns": []})),
        RuleInvocation::new("Unique", json!({"columns": []})),
        RuleInvocation::new("UniquenessDelta", json!({"columns": []})),
        RuleInvocation::new("AllowedValues", json!({"column": "s", "values": []})),
        RuleInvocation::new("Schema", json!({"requiredColumns": []})),
    ] {
        assert!(
            matches!(compile(&inv), Err(ExpectationError::Invalid { .. })),
            "{:?}",
            inv
        );
    }
}

#[test]
fn test_invalid_regex_is_invalid() {
    let inv = RuleInvocation::new("Pattern", json!({"column": "email", "pattern": "(["}));
    assert!(matches!(
        compile(&inv).unwrap_err(),
        ExpectationError::Invalid { .. }
    ));
}

#[test]
fn test_expectation_into_invocation_compiles_back() {
    let expectation = Expectation::AllowedValues(
        AllowedValuesCheck::new("status", ["active", "inactive"]).ignoring_case(),
    );
    let inv = RuleInvocation::from(expectation.clone());
    assert_eq!(inv.rule, "AllowedValuesCheck");
    assert_eq!(compile(&inv).unwrap(), expectation);
}
