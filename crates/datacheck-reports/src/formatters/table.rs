use datacheck_core::{Overall, Report, Summary};
use prettytable::{Cell, Row, Table};

use crate::{utils::numbers::format_numbers, Reporter, TableRole};

/// Bordered table of check results, printed once the run is complete.
pub struct TableFormatter {
    loaded: Vec<(TableRole, String, usize)>,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableFormatter {
    pub fn new() -> Self {
        Self { loaded: Vec::new() }
    }

    pub fn render(&self, report: &Report) -> String {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("#"),
            Cell::new("Rule"),
            Cell::new("Status"),
            Cell::new("Message"),
        ]));

        for (i, check) in report.checks().iter().enumerate() {
            table.add_row(Row::new(vec![
                Cell::new(&(i + 1).to_string()),
                Cell::new(&check.rule),
                Cell::new(&check.status.to_string()),
                Cell::new(&check.message),
            ]));
        }

        table.to_string()
    }

    pub fn render_sources(&self) -> String {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("Role"),
            Cell::new("Path"),
            Cell::new("Rows"),
        ]));
        for (role, path, rows) in &self.loaded {
            table.add_row(Row::new(vec![
                Cell::new(&role.to_string()),
                Cell::new(path),
                Cell::new(&format_numbers(*rows)),
            ]));
        }
        table.to_string()
    }
}

impl Reporter for TableFormatter {
    fn on_start(&self) {}

    fn on_loading(&self) {}

    fn on_table_load(&mut self, role: TableRole, path: &str, rows: usize) {
        self.loaded.push((role, path.to_string(), rows));
    }

    fn on_validation_start(&self) {}

    fn on_report(&mut self, report: &Report) {
        if !self.loaded.is_empty() {
            println!("{}", self.render_sources());
        }
        println!("{}", self.render(report));
    }

    fn on_summary(&self, summary: Summary, overall: Overall) {
        println!(
            "Overall: {} ({} passed, {} failed, {} errored)",
            overall, summary.passed, summary.failed, summary.errored
        );
    }
}

#[cfg(test)]
mod tests {
    use datacheck_core::{CheckResult, Status};

    use super::*;

    #[test]
    fn test_render_lists_every_check() {
        let report = Report::aggregate(vec![
            CheckResult::new("RowCount".to_string(), Status::Pass, "ok".to_string()),
            CheckResult::new(
                "Unique".to_string(),
                Status::Fail,
                "1 duplicate row(s) found".to_string(),
            ),
        ]);
        let rendered = TableFormatter::new().render(&report);
        assert!(rendered.contains("RowCount"));
        assert!(rendered.contains("PASS"));
        assert!(rendered.contains("1 duplicate row(s) found"));
        assert!(rendered.contains("FAIL"));
    }

    #[test]
    fn test_render_sources() {
        let mut formatter = TableFormatter::new();
        formatter.on_table_load(TableRole::Dataset, "cleaned.csv", 24);
        formatter.on_table_load(TableRole::Reference, "messy.csv", 25);
        let rendered = formatter.render_sources();
        assert!(rendered.contains("cleaned.csv"));
        assert!(rendered.contains("reference"));
        assert!(rendered.contains("25"));
    }
}
