//! Scratch directory for one test run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tempfile::TempDir;

use termcode_core::model::TestCase;

use crate::driver::DRIVER_SCRIPT;

/// A temporary directory holding the solution, its test cases, and the
/// driver script that runs them.
///
/// On drop, the temporary directory is automatically cleaned up.
pub struct Sandbox {
    /// Temporary directory the interpreter runs in.
    work_dir: TempDir,
    /// Timeout for the whole run.
    timeout: Duration,
}

impl Sandbox {
    /// Create a new sandbox with the driver script in place.
    pub fn new(timeout: Duration) -> Result<Self> {
        let work_dir = TempDir::new().context("failed to create temp directory")?;

        std::fs::write(work_dir.path().join("driver.py"), DRIVER_SCRIPT)
            .context("failed to write driver.py")?;

        Ok(Self { work_dir, timeout })
    }

    /// Get the path to the sandbox working directory.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.path()
    }

    /// Get the sandbox timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn driver_path(&self) -> PathBuf {
        self.work_dir.path().join("driver.py")
    }

    pub fn solution_path(&self) -> PathBuf {
        self.work_dir.path().join("solution.py")
    }

    pub fn cases_path(&self) -> PathBuf {
        self.work_dir.path().join("cases.json")
    }

    /// Where the driver writes its report.
    pub fn result_path(&self) -> PathBuf {
        self.work_dir.path().join("result.json")
    }

    /// Write the user's solution into the sandbox.
    pub fn write_source(&self, code: &str) -> Result<()> {
        std::fs::write(self.solution_path(), code).context("failed to write solution.py")?;
        Ok(())
    }

    /// Write the test cases the driver will evaluate.
    pub fn write_cases(&self, cases: &[TestCase]) -> Result<()> {
        let json = serde_json::to_string(cases).context("failed to serialize test cases")?;
        std::fs::write(self.cases_path(), json).context("failed to write cases.json")?;
        Ok(())
    }

    /// Build environment variables for the child process.
    ///
    /// Blanks sensitive env vars so user code cannot read them.
    pub fn build_env(&self) -> Vec<(String, String)> {
        let mut env = vec![
            ("PYTHONDONTWRITEBYTECODE".to_string(), "1".to_string()),
            ("PYTHONIOENCODING".to_string(), "utf-8".to_string()),
        ];

        for var in &[
            "SSH_AUTH_SOCK",
            "AWS_ACCESS_KEY_ID",
            "AWS_SECRET_ACCESS_KEY",
            "AWS_SESSION_TOKEN",
            "GITHUB_TOKEN",
            "GH_TOKEN",
            "CARGO_REGISTRY_TOKEN",
            "ANTHROPIC_API_KEY",
            "OPENAI_API_KEY",
            "DOCKER_HOST",
            "DOCKER_CONFIG",
            "KUBECONFIG",
            "DATABASE_URL",
            "NPM_TOKEN",
            "PYTHONSTARTUP",
            "PYTHONPATH",
        ] {
            env.push((var.to_string(), String::new()));
        }

        env
    }
}
