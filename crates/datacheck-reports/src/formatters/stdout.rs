use datacheck_core::{CheckResult, Overall, Report, Summary};

use crate::{utils::numbers::format_numbers, Reporter, TableRole};

/// Human-readable report: one `[STATUS] RULE - message` line per check.
pub struct StdOutFormatter {
    intro: String,
}

impl StdOutFormatter {
    pub fn new(version: String) -> Self {
        Self {
            intro: format!("DataCheck v{} - Validation Report", version),
        }
    }

    pub fn format_check(result: &CheckResult) -> String {
        format!("[{}] {} - {}", result.status, result.rule, result.message)
    }

    pub fn format_summary(summary: Summary, overall: Overall) -> String {
        format!(
            "Result: {} passed, {} failed, {} errored - {}",
            summary.passed, summary.failed, summary.errored, overall
        )
    }

    pub fn print_loading_start(&self) {
        println!("Loading data...");
    }

    pub fn print_loading_progress(&self, role: TableRole, path: &str, rows: usize) {
        println!("  {}: {} ({} rows)", role, path, format_numbers(rows));
    }

    pub fn print_validation_start(&self) {
        println!("\nValidating...");
    }

    pub fn print_report(&self, report: &Report) {
        for check in report.checks() {
            println!("{}", Self::format_check(check));
        }
    }

    pub fn print_summary(&self, summary: Summary, overall: Overall) {
        println!("\n{}", "=".repeat(self.intro.len()));
        println!("{}", Self::format_summary(summary, overall));
    }
}

impl Reporter for StdOutFormatter {
    fn on_start(&self) {
        println!("{}", self.intro);
        println!("{}", "=".repeat(self.intro.len()));
    }

    fn on_loading(&self) {
        self.print_loading_start();
    }

    fn on_table_load(&mut self, role: TableRole, path: &str, rows: usize) {
        self.print_loading_progress(role, path, rows);
    }

    fn on_validation_start(&self) {
        self.print_validation_start();
    }

    fn on_report(&mut self, report: &Report) {
        self.print_report(report);
    }

    fn on_summary(&self, summary: Summary, overall: Overall) {
        self.print_summary(summary, overall);
    }
}

#[cfg(test)]
mod tests {
    use datacheck_core::Status;

    use super::*;

    #[test]
    fn test_check_line() {
        let result = CheckResult::new(
            "RowCount".to_string(),
            Status::Fail,
            "row count 25 outside [24,24]".to_string(),
        );
        assert_eq!(
            StdOutFormatter::format_check(&result),
            "[FAIL] RowCount - row count 25 outside [24,24]"
        );
    }

    #[test]
    fn test_error_line() {
        let result = CheckResult::error(
            "Frobnicate".to_string(),
            "Unknown rule 'Frobnicate'".to_string(),
        );
        assert!(StdOutFormatter::format_check(&result).starts_with("[ERROR] Frobnicate - "));
    }

    #[test]
    fn test_summary_line() {
        let summary = Summary {
            passed: 5,
            failed: 1,
            errored: 0,
        };
        assert_eq!(
            StdOutFormatter::format_summary(summary, Overall::Fail),
            "Result: 5 passed, 1 failed, 0 errored - FAIL"
        );
    }
}
