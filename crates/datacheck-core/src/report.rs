use std::fmt;

use serde::{Deserialize, Serialize};

use crate::results::{CheckResult, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overall {
    Pass,
    Fail,
}

impl fmt::Display for Overall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Overall::Pass => f.write_str("PASS"),
            Overall::Fail => f.write_str("FAIL"),
        }
    }
}

/// Every check of one validation run, plus the derived verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    overall: Overall,
    checks: Vec<CheckResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

impl Report {
    /// Overall is `Pass` only when every result is `Pass`; an empty run passes.
    /// All results are kept, in the given order.
    pub fn aggregate(checks: Vec<CheckResult>) -> Self {
        let overall = if checks.iter().all(CheckResult::is_passed) {
            Overall::Pass
        } else {
            Overall::Fail
        };
        Self { overall, checks }
    }

    pub fn overall(&self) -> Overall {
        self.overall
    }

    pub fn is_passed(&self) -> bool {
        self.overall == Overall::Pass
    }

    pub fn checks(&self) -> &[CheckResult] {
        &self.checks
    }

    pub fn summary(&self) -> Summary {
        self.checks
            .iter()
            .fold(Summary::default(), |mut acc, c| {
                match c.status {
                    Status::Pass => acc.passed += 1,
                    Status::Fail => acc.failed += 1,
                    Status::Error => acc.errored += 1,
                }
                acc
            })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
