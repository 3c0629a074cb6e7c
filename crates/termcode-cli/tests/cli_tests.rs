//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn termcode(home: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("termcode").unwrap();
    cmd.env("TERMCODE_HOME", home)
        .env_remove("TERMCODE_TEMPLATE_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn write_problem(home: &Path, file: &str, id: u32, title: &str) {
    let dir = home.join("problems");
    std::fs::create_dir_all(&dir).unwrap();
    let doc = serde_json::json!({
        "id": id,
        "title": title,
        "difficulty": "medium",
        "description": "Reverse a string.",
        "function_template": "def reverse(s):\n    pass\n",
        "test_cases": [
            {"inputs": ["abc"], "expected_output": "cba"},
            {"inputs": [""], "expected_output": ""}
        ],
        "completion": "no"
    });
    std::fs::write(dir.join(file), doc.to_string()).unwrap();
}

fn read_id(path: &Path) -> u64 {
    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    doc["id"].as_u64().unwrap()
}

#[test]
fn help_lists_flags_and_storage() {
    let dir = TempDir::new().unwrap();
    termcode(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--shuffle"))
        .stdout(predicate::str::contains("--template"))
        .stdout(predicate::str::contains("~/.termcode/problems/"));
}

#[test]
fn version() {
    let dir = TempDir::new().unwrap();
    termcode(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("termcode 0.5"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    termcode(dir.path())
        .args(["--import", "https://example.com/p.json"])
        .assert()
        .code(2);
}

#[test]
fn actions_are_exclusive() {
    let dir = TempDir::new().unwrap();
    termcode(dir.path())
        .args(["--shuffle", "--editor"])
        .assert()
        .code(2);
}

#[test]
fn shuffle_without_duplicates() {
    let dir = TempDir::new().unwrap();
    write_problem(dir.path(), "a.json", 1, "one");
    write_problem(dir.path(), "b.json", 2, "two");

    termcode(dir.path())
        .arg("--shuffle")
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicate IDs detected!"));
}

#[test]
fn shuffle_repairs_duplicates() {
    let dir = TempDir::new().unwrap();
    write_problem(dir.path(), "a.json", 1, "one");
    write_problem(dir.path(), "b.json", 1, "two");

    termcode(dir.path())
        .arg("--shuffle")
        .assert()
        .success()
        .stdout(predicate::str::contains("ID numbers reshuffled successfully!"));

    assert_eq!(read_id(&dir.path().join("problems/a.json")), 1);
    assert_eq!(read_id(&dir.path().join("problems/b.json")), 2);

    termcode(dir.path())
        .arg("--shuffle")
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicate IDs detected!"));
}

#[cfg(unix)]
#[test]
fn editor_flag_creates_config() {
    let dir = TempDir::new().unwrap();
    termcode(dir.path())
        .env("EDITOR", "true")
        .arg("--editor")
        .assert()
        .success();

    let config = std::fs::read_to_string(dir.path().join(".config.json")).unwrap();
    assert!(config.contains("\"editor\""));
}

#[cfg(unix)]
#[test]
fn failing_editor_exits_with_error() {
    let dir = TempDir::new().unwrap();
    termcode(dir.path())
        .env("EDITOR", "false")
        .arg("--editor")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn quit_immediately() {
    let dir = TempDir::new().unwrap();
    write_problem(dir.path(), "a.json", 1, "reverse string");

    termcode(dir.path())
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available Problems"))
        .stdout(predicate::str::contains("Reverse string"));

    assert!(dir.path().join("solutions").is_dir());
    assert!(dir.path().join("creations").is_dir());
}

#[test]
fn empty_home_shows_empty_state() {
    let dir = TempDir::new().unwrap();
    termcode(dir.path())
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No problems found"));
}

#[test]
fn open_problem_and_return() {
    let dir = TempDir::new().unwrap();
    write_problem(dir.path(), "a.json", 1, "reverse string");

    termcode(dir.path())
        .write_stdin("1\nr\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Problem 1"))
        .stdout(predicate::str::contains("Reverse a string."))
        .stdout(predicate::str::contains("Test Case 2:"));
}

#[test]
fn test_without_solution() {
    let dir = TempDir::new().unwrap();
    write_problem(dir.path(), "a.json", 1, "reverse string");

    termcode(dir.path())
        .write_stdin("1\nt\n\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No solution provided yet!"));
}

#[test]
fn end_of_input_exits_cleanly() {
    let dir = TempDir::new().unwrap();
    write_problem(dir.path(), "a.json", 1, "reverse string");

    termcode(dir.path()).write_stdin("1\n").assert().success();
}

#[test]
fn session_repairs_duplicate_ids_on_start() {
    let dir = TempDir::new().unwrap();
    write_problem(dir.path(), "a.json", 1, "first");
    write_problem(dir.path(), "b.json", 1, "second");

    termcode(dir.path())
        .write_stdin("2\nr\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Problem 2"))
        .stdout(predicate::str::contains("Skipped").not());

    assert_eq!(read_id(&dir.path().join("problems/b.json")), 2);
}
