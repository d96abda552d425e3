use serde_json::json;

use super::*;
use crate::{
    compiler::{Expectation, RuleInvocation},
    report::Overall,
    results::Status,
    rules::{RowCountCheck, SortOrder, SortOrderCheck},
    table::Table,
};

fn table() -> Table {
    Table::from_raw(
        &["id", "name", "status"],
        &[
            vec!["1", "alice", "active"],
            vec!["2", "bob", "inactive"],
            vec!["3", "carol", "active"],
        ],
    )
    .unwrap()
}

fn suite() -> Vec<RuleInvocation> {
    vec![
        RuleInvocation::new("RowCount", json!({"min": 3, "max": 3})),
        RuleInvocation::new("Frobnicate", json!({"speed": 11})),
        RuleInvocation::new("Unique", json!(null)),
        RuleInvocation::new("TextCase", json!({"column": "status", "case": "Lower"})),
        RuleInvocation::new("SortOrder", json!({"column": "name", "order": "Ascending"})),
    ]
}

#[test]
fn test_unknown_rule_does_not_abort_run() {
    let report = run(&table(), None, &suite());
    assert_eq!(report.checks().len(), 5);
    assert_eq!(report.checks()[1].status, Status::Error);
    assert_eq!(report.checks()[1].rule, "Frobnicate");
    assert!(report.checks()[1].message.contains("Unknown rule"));
    for i in [0, 2, 3, 4] {
        assert_eq!(report.checks()[i].status, Status::Pass, "{:?}", report.checks()[i]);
    }
    assert_eq!(report.overall(), Overall::Fail);
}

#[test]
fn test_results_keep_invocation_order() {
    let report = run(&table(), None, &suite());
    let names: Vec<&str> = report.checks().iter().map(|c| c.rule.as_str()).collect();
    assert_eq!(
        names,
        vec!["RowCount", "Frobnicate", "Unique", "TextCase", "SortOrder"]
    );
}

#[test]
fn test_results_independent_of_subset_and_order() {
    let full = run(&table(), None, &suite());
    let mut reversed = suite();
    reversed.reverse();
    let backwards = run(&table(), None, &reversed);
    for (a, b) in full.checks().iter().zip(backwards.checks().iter().rev()) {
        assert_eq!(a, b);
    }
    let single = run(&table(), None, &suite()[3..4]);
    assert_eq!(single.checks()[0], full.checks()[3]);
}

#[test]
fn test_malformed_expectation_is_error() {
    let invocations = vec![
        RuleInvocation::new("RowCount", json!({"min": "three", "max": 3})),
        RuleInvocation::new("RowCount", json!({"min": 0, "max": 10})),
    ];
    let report = run(&table(), None, &invocations);
    assert_eq!(report.checks()[0].status, Status::Error);
    assert_eq!(report.checks()[1].status, Status::Pass);
}

#[test]
fn test_missing_column_is_error_not_fail() {
    let invocations = vec![RuleInvocation::new(
        "NoNulls",
        json!({"columns": ["age"]}),
    )];
    let report = run(&table(), None, &invocations);
    assert_eq!(report.checks()[0].status, Status::Error);
    assert_eq!(report.checks()[0].message, "Column 'age' not found in table");
}

#[test]
fn test_reference_rules_without_reference_are_errors() {
    let invocations = vec![
        RuleInvocation::new("RowCountDelta", json!({"min": 0, "max": 0})),
        RuleInvocation::new("UniquenessDelta", json!({})),
    ];
    let report = run(&table(), None, &invocations);
    assert!(report.checks().iter().all(|c| c.status == Status::Error));

    let reference = table();
    let report = run(&table(), Some(&reference), &invocations);
    assert!(report.is_passed());
}

#[test]
fn test_data_violation_is_fail() {
    let invocations = vec![RuleInvocation::new(
        "SortOrder",
        json!({"column": "name", "order": "Descending"}),
    )];
    let report = run(&table(), None, &invocations);
    assert_eq!(report.checks()[0].status, Status::Fail);
    assert_eq!(report.checks()[0].message, "row 1: out-of-order value bob");
}

#[test]
fn test_empty_suite_passes() {
    let report = run(&table(), None, &[]);
    assert!(report.is_passed());
    assert!(report.checks().is_empty());
}

#[test]
fn test_run_expectations_uses_canonical_names() {
    let t = table();
    let engine = ValidationEngine::new(&t, None);
    let report = engine.run_expectations(&[
        Expectation::RowCount(RowCountCheck::new(1, 2)),
        Expectation::SortOrder(SortOrderCheck::new("id", SortOrder::Ascending)),
    ]);
    assert_eq!(report.checks()[0].rule, "RowCountCheck");
    assert_eq!(report.checks()[0].status, Status::Fail);
    assert_eq!(report.checks()[1].status, Status::Pass);
}

#[test]
fn test_row_count_is_idempotent_through_engine() {
    let t = table();
    let engine = ValidationEngine::new(&t, None);
    let inv = RuleInvocation::new("RowCount", json!({"min": 1, "max": 2}));
    assert_eq!(engine.evaluate(&inv), engine.evaluate(&inv));
}
