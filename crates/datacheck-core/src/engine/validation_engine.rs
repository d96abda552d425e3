use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    compiler::{compile, Expectation, RuleInvocation},
    report::Report,
    results::CheckResult,
    table::Table,
};

/// ValidationEngine - folds an ordered list of rule invocations over a table.
///
/// Borrows the primary table and the optional reference table for the duration
/// of a run and builds a fresh [`Report`] each time. Invocations are evaluated
/// in parallel; results keep the invocation order.
pub struct ValidationEngine<'a> {
    primary: &'a Table,
    reference: Option<&'a Table>,
}

impl<'a> ValidationEngine<'a> {
    pub fn new(primary: &'a Table, reference: Option<&'a Table>) -> Self {
        Self { primary, reference }
    }

    /// Run every invocation. A bad invocation yields an `Error` result and the
    /// rest of the suite still runs.
    pub fn run(&self, invocations: &[RuleInvocation]) -> Report {
        let results: Vec<CheckResult> = invocations
            .par_iter()
            .map(|invocation| self.evaluate(invocation))
            .collect();
        self.finish(results)
    }

    /// Run already typed expectations, reported under their canonical names.
    pub fn run_expectations(&self, expectations: &[Expectation]) -> Report {
        let results: Vec<CheckResult> = expectations
            .par_iter()
            .map(|e| self.evaluate_expectation(e.kind().canonical_name(), e))
            .collect();
        self.finish(results)
    }

    /// Evaluate a single invocation.
    pub fn evaluate(&self, invocation: &RuleInvocation) -> CheckResult {
        match compile(invocation) {
            Ok(expectation) => self.evaluate_expectation(&invocation.rule, &expectation),
            Err(e) => {
                warn!(rule = %invocation.rule, error = %e, "invalid expectation");
                CheckResult::error(invocation.rule.clone(), e.to_string())
            }
        }
    }

    fn evaluate_expectation(&self, name: &str, expectation: &Expectation) -> CheckResult {
        let rule = expectation.as_rule();
        match rule.validate(self.primary, self.reference) {
            Ok(verdict) => {
                debug!(
                    rule = name,
                    kind = rule.name(),
                    passed = verdict.passed,
                    message = %verdict.message,
                    "rule evaluated"
                );
                verdict.into_result(name.to_string())
            }
            Err(e) => {
                warn!(rule = name, error = %e, "rule could not be evaluated");
                CheckResult::error(name.to_string(), e.to_string())
            }
        }
    }

    fn finish(&self, results: Vec<CheckResult>) -> Report {
        let report = Report::aggregate(results);
        let summary = report.summary();
        info!(
            overall = %report.overall(),
            passed = summary.passed,
            failed = summary.failed,
            errored = summary.errored,
            "validation finished"
        );
        report
    }
}

/// Validate `primary` (and optionally `reference`) against `invocations`.
pub fn run(
    primary: &Table,
    reference: Option<&Table>,
    invocations: &[RuleInvocation],
) -> Report {
    ValidationEngine::new(primary, reference).run(invocations)
}
