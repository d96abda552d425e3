use std::path::PathBuf;

use datacheck_core::{
    readers::{load_path, LoaderConfig},
    run, Overall, RuleInvocation, Status, Table,
};
use serde_json::json;

fn fixture(name: &str) -> Table {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    load_path(path, &LoaderConfig::default()).unwrap()
}

/// Rebuild `table` from the given row indices, in that order.
fn rebuild(table: &Table, indices: impl Iterator<Item = usize>) -> Table {
    let rows: Vec<_> = table.rows().collect();
    Table::new(
        table.columns().to_vec(),
        indices.map(|i| rows[i].to_vec()).collect(),
    )
    .unwrap()
}

fn without_row(table: &Table, skip: usize) -> Table {
    rebuild(table, (0..table.num_rows()).filter(|&i| i != skip))
}

fn reversed(table: &Table) -> Table {
    rebuild(table, (0..table.num_rows()).rev())
}

fn cleaning_expectations() -> Vec<RuleInvocation> {
    vec![
        RuleInvocation::new("RowCount", json!({"min": 24, "max": 24})),
        RuleInvocation::new("NoNulls", json!({"columns": ["age", "salary"]})),
        RuleInvocation::new("Unique", json!({})),
        RuleInvocation::new("SortOrder", json!({"column": "name", "order": "Ascending"})),
        RuleInvocation::new("TextCase", json!({"column": "status", "case": "Lower"})),
    ]
}

#[test]
fn test_messy_fixture_shape() {
    let messy = fixture("messy.csv");
    assert_eq!(messy.num_rows(), 25);
    assert_eq!(
        messy.columns(),
        &["id", "name", "email", "age", "salary", "department", "status"]
    );
}

#[test]
fn test_cleaned_output_passes() {
    let cleaned = fixture("cleaned.csv");
    let report = run(&cleaned, None, &cleaning_expectations());
    assert_eq!(report.overall(), Overall::Pass, "{:#?}", report);
    assert_eq!(report.checks().len(), 5);
}

#[test]
fn test_messy_input_fails_every_cleaning_rule() {
    let messy = fixture("messy.csv");
    let report = run(&messy, None, &cleaning_expectations());
    assert_eq!(report.overall(), Overall::Fail);
    assert!(report.checks().iter().all(|c| c.status == Status::Fail));

    let checks = report.checks();
    assert_eq!(checks[0].message, "row count 25 outside [24,24]");
    assert_eq!(
        checks[1].message,
        "age: 2 NULL values found; salary: 2 NULL values found"
    );
    assert_eq!(checks[2].message, "1 duplicate row(s) found");
    assert_eq!(checks[3].message, "row 1: out-of-order value Jane Doe");
}

#[test]
fn test_null_absence_before_and_after_imputation() {
    let expectation = [RuleInvocation::new("NoNulls", json!({"columns": ["age", "salary"]}))];
    assert!(run(&fixture("cleaned.csv"), None, &expectation).is_passed());

    let age_only = [RuleInvocation::new("NoNulls", json!({"columns": ["age"]}))];
    let report = run(&fixture("messy.csv"), None, &age_only);
    assert_eq!(report.checks()[0].status, Status::Fail);
    assert_eq!(report.checks()[0].message, "age: 2 NULL values found");
}

#[test]
fn test_deduplication_invariant() {
    let messy = fixture("messy.csv");
    let unique = [RuleInvocation::new("Unique", json!(null))];

    let report = run(&messy, None, &unique);
    assert_eq!(report.checks()[0].message, "1 duplicate row(s) found");
    assert_eq!(report.checks()[0].details.as_ref().unwrap()["rows"], json!([4]));

    let deduped = without_row(&messy, 4);
    assert!(run(&deduped, None, &unique).is_passed());
}

#[test]
fn test_sort_order_reversal() {
    let cleaned = fixture("cleaned.csv");
    let sort = [RuleInvocation::new("SortOrder", json!({"column": "name", "order": "Ascending"}))];
    assert!(run(&cleaned, None, &sort).is_passed());

    let report = run(&reversed(&cleaned), None, &sort);
    assert_eq!(report.checks()[0].status, Status::Fail);
    assert_eq!(
        report.checks()[0].message,
        "row 1: out-of-order value Uma Thurman"
    );
    assert_eq!(
        report.checks()[0].details.as_ref().unwrap()["violations"],
        23
    );
}

#[test]
fn test_before_after_comparison() {
    let messy = fixture("messy.csv");
    let cleaned = fixture("cleaned.csv");
    let invocations = vec![
        RuleInvocation::new("RowCountDelta", json!({"min": 1, "max": 1})),
        RuleInvocation::new(
            "UniquenessDelta",
            json!({"columns": ["id", "name", "email", "department"]}),
        ),
        RuleInvocation::new(
            "Schema",
            json!({
                "requiredColumns": ["id", "name", "email", "age", "salary", "department", "status"],
                "exact": true
            }),
        ),
        RuleInvocation::new(
            "AllowedValues",
            json!({"column": "status", "values": ["active", "inactive"]}),
        ),
        RuleInvocation::new(
            "AllowedValues",
            json!({"column": "department", "values": ["Engineering", "Marketing", "HR", "Sales"]}),
        ),
        RuleInvocation::new(
            "Pattern",
            json!({"column": "email", "pattern": r"^[\w\.-]+@[\w\.-]+\.\w+$"}),
        ),
    ];
    let report = run(&cleaned, Some(&messy), &invocations);
    assert!(report.is_passed(), "{:#?}", report);
}

#[test]
fn test_mixed_suite_with_unknown_rule() {
    let cleaned = fixture("cleaned.csv");
    let mut invocations = cleaning_expectations();
    invocations.insert(2, RuleInvocation::new("Frobnicate", json!({})));
    let report = run(&cleaned, None, &invocations);

    assert_eq!(report.overall(), Overall::Fail);
    let summary = report.summary();
    assert_eq!(summary.passed, 5);
    assert_eq!(summary.errored, 1);
    assert_eq!(summary.failed, 0);
}

#[test]
fn test_report_json_document() {
    let cleaned = fixture("cleaned.csv");
    let report = run(
        &cleaned,
        None,
        &[RuleInvocation::new("RowCount", json!({"min": 24, "max": 24}))],
    );
    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(value["overall"], "Pass");
    assert_eq!(value["checks"][0]["rule"], "RowCount");
    assert_eq!(value["checks"][0]["status"], "Pass");
}
