//! Results of running a solution against a problem's test cases.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a single test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseOutcome {
    /// Returned the expected value.
    Passed,
    /// Returned something else.
    Failed,
    /// Raised an exception.
    Errored,
}

/// Result of one test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    pub inputs: Vec<Value>,
    pub expected: Value,
    pub outcome: CaseOutcome,
    /// `repr()` of the returned value, when the call returned.
    #[serde(default)]
    pub actual: Option<String>,
    /// Exception message, when the call raised.
    #[serde(default)]
    pub error: Option<String>,
    /// Anything the solution printed during this case.
    #[serde(default)]
    pub stdout: String,
}

/// How a run ended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The solution could not be loaded; no case was evaluated.
    LoadFailed { message: String },
    /// Every case was evaluated.
    Completed { cases: Vec<CaseResult> },
}

/// A full test run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRun {
    pub outcome: RunOutcome,
    pub duration_ms: u64,
}

impl TestRun {
    pub fn load_failed(message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            outcome: RunOutcome::LoadFailed {
                message: message.into(),
            },
            duration_ms,
        }
    }

    pub fn completed(cases: Vec<CaseResult>, duration_ms: u64) -> Self {
        Self {
            outcome: RunOutcome::Completed { cases },
            duration_ms,
        }
    }

    /// Per-case results; empty when loading failed.
    pub fn cases(&self) -> &[CaseResult] {
        match &self.outcome {
            RunOutcome::Completed { cases } => cases,
            RunOutcome::LoadFailed { .. } => &[],
        }
    }

    /// True only if the solution loaded and every case passed.
    pub fn all_passed(&self) -> bool {
        match &self.outcome {
            RunOutcome::Completed { cases } => {
                cases.iter().all(|c| c.outcome == CaseOutcome::Passed)
            }
            RunOutcome::LoadFailed { .. } => false,
        }
    }

    pub fn count(&self, outcome: CaseOutcome) -> usize {
        self.cases().iter().filter(|c| c.outcome == outcome).count()
    }
}
