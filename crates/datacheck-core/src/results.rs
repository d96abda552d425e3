use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The invariant holds
    Pass,
    /// The invariant was evaluated and the data violates it
    Fail,
    /// The check could not be evaluated (configuration or input problem)
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
            Status::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// Outcome of one rule invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub rule: String,
    pub status: Status,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl CheckResult {
    pub fn new(rule: String, status: Status, message: String) -> Self {
        Self {
            rule,
            status,
            message,
            details: None,
        }
    }

    pub fn error(rule: String, message: String) -> Self {
        Self::new(rule, Status::Error, message)
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn is_passed(&self) -> bool {
        self.status == Status::Pass
    }
}

/// What a rule concluded about the data, before it is attached to a rule name.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub passed: bool,
    pub message: String,
    pub details: Option<Value>,
}

impl Verdict {
    pub fn pass(message: String) -> Self {
        Self {
            passed: true,
            message,
            details: None,
        }
    }

    pub fn fail(message: String) -> Self {
        Self {
            passed: false,
            message,
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn into_result(self, rule: String) -> CheckResult {
        let status = if self.passed {
            Status::Pass
        } else {
            Status::Fail
        };
        CheckResult {
            rule,
            status,
            message: self.message,
            details: self.details,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_serializes_as_name() {
        assert_eq!(serde_json::to_value(Status::Error).unwrap(), json!("Error"));
    }

    #[test]
    fn test_details_omitted_when_absent() {
        let result = CheckResult::new("RowCount".to_string(), Status::Pass, "ok".to_string());
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({"rule": "RowCount", "status": "Pass", "message": "ok"})
        );
    }

    #[test]
    fn test_verdict_into_result() {
        let result = Verdict::fail("bad".to_string())
            .with_details(json!({"count": 2}))
            .into_result("NoNulls".to_string());
        assert_eq!(result.status, Status::Fail);
        assert_eq!(result.details, Some(json!({"count": 2})));
    }
}
