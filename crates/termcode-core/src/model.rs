//! Core data model types for termcode.
//!
//! A problem file holds one `Problem`: its description, a Python function
//! template, and the test cases a solution is checked against.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One input/expected-output pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Positional arguments passed to the solution function.
    pub inputs: Vec<Value>,
    /// Value the function must return.
    pub expected_output: Value,
}

/// Problem difficulty, parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        value.to_string().to_lowercase()
    }
}

/// How far the user has got with a problem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Completion {
    #[default]
    #[serde(rename = "no")]
    NotStarted,
    #[serde(rename = "incomplete")]
    InProgress,
    #[serde(rename = "yes")]
    Done,
}

impl Completion {
    /// The value stored in problem files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Completion::NotStarted => "no",
            Completion::InProgress => "incomplete",
            Completion::Done => "yes",
        }
    }
}

/// A coding challenge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    /// Identifier used to select the problem from the listing.
    pub id: u32,
    pub title: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub description: String,
    /// Starter code: a Python `def` with the function name and parameters.
    pub function_template: String,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub completion: Completion,
    /// File this problem was loaded from.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Problem {
    /// Name of the function declared by the template, if any.
    ///
    /// Takes the text between the first `def ` and the following `(`.
    pub fn function_name(&self) -> Option<&str> {
        let (_, rest) = self.function_template.split_once("def ")?;
        let (name, _) = rest.split_once('(')?;
        let name = name.trim();
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return None;
        }
        Some(name)
    }

    pub fn is_done(&self) -> bool {
        self.completion == Completion::Done
    }
}
