//! Trait seams for running solutions and editing files.
//!
//! `SolutionRunner` is implemented by `termcode-runner`; `Editor` by the CLI.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RunnerError;
use crate::model::{Problem, TestCase};
use crate::results::TestRun;

// ---------------------------------------------------------------------------
// Solution runner
// ---------------------------------------------------------------------------

/// Executes user code against test cases.
#[async_trait]
pub trait SolutionRunner: Send + Sync {
    /// Run `request.code` against every test case.
    ///
    /// Failures of the user's code are reported inside the returned
    /// `TestRun`; an `Err` means the harness itself failed.
    async fn run(&self, request: &RunRequest) -> anyhow::Result<TestRun>;
}

/// Request to test a solution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    /// Solution source code.
    pub code: String,
    /// Name of the function to call.
    pub function_name: String,
    /// Cases to evaluate, in order.
    pub test_cases: Vec<TestCase>,
    /// Wall-clock limit for the whole run, in seconds.
    pub timeout_secs: u64,
}

impl RunRequest {
    /// Build a request for `problem`'s declared function and test cases.
    pub fn for_problem(
        problem: &Problem,
        code: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, RunnerError> {
        let function_name = problem.function_name().ok_or(RunnerError::NoFunction)?;
        Ok(Self {
            code: code.into(),
            function_name: function_name.to_string(),
            test_cases: problem.test_cases.clone(),
            timeout_secs,
        })
    }
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// Opens a file for the user to edit, blocking until they are done.
pub trait Editor {
    fn edit(&self, path: &Path) -> anyhow::Result<()>;
}
