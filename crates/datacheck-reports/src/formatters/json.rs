use chrono::Local;
use datacheck_core::{Overall, Report, Summary};
use serde::{Deserialize, Serialize};
use serde_json::Error;

use crate::{Reporter, TableRole};

/// JSON document: the report wrapped with run metadata.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonFormatter {
    version: String,
    timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dataset: Option<SourceFormatter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference: Option<SourceFormatter>,
    #[serde(flatten)]
    report: Option<Report>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SourceFormatter {
    path: String,
    rows: usize,
}

impl JsonFormatter {
    pub fn new(version: String) -> Self {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Self {
            version,
            timestamp,
            dataset: None,
            reference: None,
            report: None,
        }
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Reporter for JsonFormatter {
    fn on_start(&self) {}

    fn on_loading(&self) {}

    fn on_table_load(&mut self, role: TableRole, path: &str, rows: usize) {
        let source = Some(SourceFormatter {
            path: path.to_string(),
            rows,
        });
        match role {
            TableRole::Dataset => self.dataset = source,
            TableRole::Reference => self.reference = source,
        }
    }

    fn on_validation_start(&self) {}

    fn on_report(&mut self, report: &Report) {
        self.report = Some(report.clone());
    }

    fn on_summary(&self, _summary: Summary, _overall: Overall) {}
}
