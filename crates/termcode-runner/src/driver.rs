//! Python driver process: runs a solution against its test cases.

use std::process::Stdio;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::process::Command;

use termcode_core::error::RunnerError;
use termcode_core::model::TestCase;
use termcode_core::results::{CaseOutcome, CaseResult, TestRun};
use termcode_core::traits::RunRequest;

use crate::sandbox::Sandbox;

/// Script executed by the interpreter.
///
/// Arguments: solution path, cases path, result path, function name.
/// Writes `{"load_error": ...}` or `{"cases": [...]}` to the result path.
pub const DRIVER_SCRIPT: &str = r#"import contextlib
import io
import json
import sys


def describe(exc):
    try:
        return f"{type(exc).__name__}: {exc}"
    except Exception:
        return type(exc).__name__


def write_report(path, report):
    with open(path, "w", encoding="utf-8") as f:
        json.dump(report, f)


def main():
    solution_path, cases_path, result_path, func_name = sys.argv[1:5]
    with open(cases_path, encoding="utf-8") as f:
        cases = json.load(f)

    namespace = {"__name__": "solution"}
    try:
        with open(solution_path, encoding="utf-8") as f:
            source = f.read()
        with contextlib.redirect_stdout(io.StringIO()):
            exec(compile(source, "solution.py", "exec"), namespace)
    except BaseException as exc:
        write_report(result_path, {"load_error": describe(exc)})
        return

    func = namespace.get(func_name)
    if not callable(func):
        write_report(result_path, {"load_error": f"function '{func_name}' is not defined"})
        return

    results = []
    for case in cases:
        inputs = case["inputs"]
        captured = io.StringIO()
        try:
            with contextlib.redirect_stdout(captured):
                if len(inputs) == 1:
                    actual = func(inputs[0])
                else:
                    actual = func(*inputs)
                passed = bool(actual == case["expected_output"])
                actual_repr = repr(actual)
        except (Exception, SystemExit) as exc:
            results.append({
                "outcome": "errored",
                "error": describe(exc),
                "stdout": captured.getvalue(),
            })
            continue
        results.append({
            "outcome": "passed" if passed else "failed",
            "actual": actual_repr,
            "stdout": captured.getvalue(),
        })

    write_report(result_path, {"cases": results})


if __name__ == "__main__":
    main()
"#;

/// Report written by the driver.
#[derive(Debug, Deserialize)]
struct DriverReport {
    #[serde(default)]
    load_error: Option<String>,
    #[serde(default)]
    cases: Vec<DriverCase>,
}

#[derive(Debug, Deserialize)]
struct DriverCase {
    outcome: CaseOutcome,
    #[serde(default)]
    actual: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    stdout: String,
}

/// Run the driver for a prepared sandbox.
pub async fn run_driver(
    sandbox: &Sandbox,
    interpreter: &str,
    request: &RunRequest,
) -> Result<TestRun> {
    let start = Instant::now();

    let mut cmd = Command::new(interpreter);
    cmd.arg(sandbox.driver_path())
        .arg(sandbox.solution_path())
        .arg(sandbox.cases_path())
        .arg(sandbox.result_path())
        .arg(&request.function_name)
        .current_dir(sandbox.work_dir())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    for (key, val) in sandbox.build_env() {
        cmd.env(&key, &val);
    }

    let child = cmd
        .spawn()
        .map_err(|e| RunnerError::InterpreterUnavailable {
            interpreter: interpreter.to_string(),
            message: e.to_string(),
        })?;

    // Dropping the future on timeout drops the child, which kills it.
    let output = match tokio::time::timeout(sandbox.timeout(), child.wait_with_output()).await {
        Ok(output) => output.context("failed to wait for test driver")?,
        Err(_) => return Err(RunnerError::Timeout(sandbox.timeout().as_secs()).into()),
    };

    let duration_ms = start.elapsed().as_millis() as u64;

    let result_path = sandbox.result_path();
    if !result_path.exists() {
        return Err(RunnerError::DriverCrashed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }

    let report = std::fs::read_to_string(&result_path).context("failed to read driver report")?;
    parse_report(&report, &request.test_cases, duration_ms)
}

/// Turn the driver's JSON report into a `TestRun`.
fn parse_report(report: &str, cases: &[TestCase], duration_ms: u64) -> Result<TestRun> {
    let report: DriverReport =
        serde_json::from_str(report).context("failed to parse driver report")?;

    if let Some(message) = report.load_error {
        return Ok(TestRun::load_failed(message, duration_ms));
    }

    anyhow::ensure!(
        report.cases.len() == cases.len(),
        "driver reported {} results for {} test cases",
        report.cases.len(),
        cases.len()
    );

    let results = cases
        .iter()
        .zip(report.cases)
        .map(|(case, result)| CaseResult {
            inputs: case.inputs.clone(),
            expected: case.expected_output.clone(),
            outcome: result.outcome,
            actual: result.actual,
            error: result.error,
            stdout: result.stdout,
        })
        .collect();

    Ok(TestRun::completed(results, duration_ms))
}
