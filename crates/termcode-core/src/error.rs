//! Error types shared across termcode crates.
//!
//! `RunnerError` lives here rather than in `termcode-runner` so the session
//! can classify harness failures without depending on the runner crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading or writing the problem store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file extension is neither `.json` nor `.toml`.
    #[error("unsupported problem file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// No loaded problem has this identifier.
    #[error("problem {0} not found")]
    ProblemNotFound(u32),

    /// The document has no integer `id` field.
    #[error("problem file {} has no integer `id` field", .0.display())]
    MissingId(PathBuf),

    /// Another file already uses this identifier.
    #[error("duplicate id {id} (already used by {}); run `termcode --shuffle`", .first.display())]
    DuplicateId { id: u32, first: PathBuf },
}

/// Failures of the execution harness itself, as opposed to failures of the
/// user's solution.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The interpreter could not be started.
    #[error("failed to start `{interpreter}`: {message}")]
    InterpreterUnavailable { interpreter: String, message: String },

    /// The solution did not finish within the time limit.
    #[error("solution timed out after {0}s")]
    Timeout(u64),

    /// The driver exited without producing a result.
    #[error("test driver crashed (exit status {status}): {stderr}")]
    DriverCrashed { status: String, stderr: String },

    /// The template does not declare a function to call.
    #[error("function template does not declare a function")]
    NoFunction,
}

impl RunnerError {
    /// Returns `true` if retrying cannot help without user action.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            RunnerError::InterpreterUnavailable { .. } | RunnerError::NoFunction
        )
    }
}
