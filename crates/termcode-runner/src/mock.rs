//! Mock runner for testing.
//!
//! Returns scripted results without starting an interpreter, and records
//! every request it receives.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use termcode_core::results::{CaseOutcome, CaseResult, TestRun};
use termcode_core::traits::{RunRequest, SolutionRunner};

/// A runner that replays queued results.
///
/// When the queue is empty every case is reported as passed.
#[derive(Default)]
pub struct MockRunner {
    scripted: Mutex<VecDeque<TestRun>>,
    requests: Mutex<Vec<RunRequest>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result for the next call to `run`.
    pub fn push(&self, run: TestRun) {
        self.scripted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(run);
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RunRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn all_passed(request: &RunRequest) -> TestRun {
        let cases = request
            .test_cases
            .iter()
            .map(|case| CaseResult {
                inputs: case.inputs.clone(),
                expected: case.expected_output.clone(),
                outcome: CaseOutcome::Passed,
                actual: Some(case.expected_output.to_string()),
                error: None,
                stdout: String::new(),
            })
            .collect();
        TestRun::completed(cases, 0)
    }
}

#[async_trait]
impl SolutionRunner for MockRunner {
    async fn run(&self, request: &RunRequest) -> Result<TestRun> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        let next = self
            .scripted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        Ok(next.unwrap_or_else(|| Self::all_passed(request)))
    }
}
