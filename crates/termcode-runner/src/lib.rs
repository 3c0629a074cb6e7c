//! termcode-runner — subprocess execution harness.
//!
//! Each run gets a fresh temporary directory and a separate interpreter
//! process, so user code never executes inside termcode itself. The
//! process is killed when it exceeds the time limit.

pub mod driver;
pub mod mock;
pub mod sandbox;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use termcode_core::results::TestRun;
use termcode_core::traits::{RunRequest, SolutionRunner};

pub use mock::MockRunner;

/// Interpreter used when none is configured.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Default per-run time limit in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runs solutions with a local Python interpreter.
pub struct LocalRunner {
    /// Interpreter command.
    interpreter: String,
}

impl LocalRunner {
    pub fn new() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
        }
    }

    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    /// A zero timeout falls back to [`DEFAULT_TIMEOUT_SECS`].
    fn create_sandbox(&self, timeout_secs: u64) -> Result<sandbox::Sandbox> {
        let timeout_secs = if timeout_secs > 0 {
            timeout_secs
        } else {
            DEFAULT_TIMEOUT_SECS
        };
        sandbox::Sandbox::new(Duration::from_secs(timeout_secs))
    }
}

impl Default for LocalRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SolutionRunner for LocalRunner {
    async fn run(&self, request: &RunRequest) -> Result<TestRun> {
        let sandbox = self.create_sandbox(request.timeout_secs)?;
        sandbox.write_source(&request.code)?;
        sandbox.write_cases(&request.test_cases)?;

        tracing::debug!(
            "running {} against {} cases in {}",
            request.function_name,
            request.test_cases.len(),
            sandbox.work_dir().display()
        );

        let run = driver::run_driver(&sandbox, &self.interpreter, request).await?;
        tracing::info!(
            "{}: {}/{} passed in {}ms",
            request.function_name,
            run.count(termcode_core::results::CaseOutcome::Passed),
            request.test_cases.len(),
            run.duration_ms
        );
        Ok(run)
    }
}
