//! Problem store.
//!
//! Loads problem files (`.json` or `.toml`) from a directory, keeps them in
//! memory sorted by id, and writes field-level edits back to disk.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::StoreError;
use crate::model::{Completion, Problem};

/// On-disk encoding of a problem file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn of(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }

    fn parse(self, content: &str) -> Result<Value> {
        let doc: Value = match self {
            FileFormat::Json => serde_json::from_str(content)?,
            FileFormat::Toml => toml::from_str(content)?,
        };
        Ok(doc)
    }

    fn render(self, doc: &Value) -> Result<String> {
        let text = match self {
            FileFormat::Json => serde_json::to_string_pretty(doc)?,
            FileFormat::Toml => toml::to_string_pretty(doc)?,
        };
        Ok(text)
    }
}

/// Read a problem file as an untyped document, keeping every field.
fn read_document(path: &Path) -> Result<(FileFormat, Value)> {
    let format =
        FileFormat::of(path).ok_or_else(|| StoreError::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read problem file: {}", path.display()))?;
    let doc = format
        .parse(&content)
        .with_context(|| format!("failed to parse problem file: {}", path.display()))?;
    Ok((format, doc))
}

fn write_document(path: &Path, format: FileFormat, doc: &Value) -> Result<()> {
    let text = format
        .render(doc)
        .with_context(|| format!("failed to serialize problem file: {}", path.display()))?;
    std::fs::write(path, text)
        .with_context(|| format!("failed to write problem file: {}", path.display()))?;
    Ok(())
}

/// Replace one top-level field of a problem file in place.
fn update_field(path: &Path, key: &str, value: Value) -> Result<()> {
    let (format, mut doc) = read_document(path)?;
    let Some(fields) = doc.as_object_mut() else {
        anyhow::bail!("problem file is not a table: {}", path.display());
    };
    fields.insert(key.to_string(), value);
    write_document(path, format, &doc)
}

/// Problem files in `dir`, sorted by file name.
fn problem_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && FileFormat::of(&path).is_some() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Parse a single problem file.
pub fn parse_problem(path: &Path) -> Result<Problem> {
    let (_, doc) = read_document(path)?;
    let mut problem: Problem = serde_json::from_value(doc)
        .with_context(|| format!("invalid problem definition: {}", path.display()))?;
    problem.source = Some(path.to_path_buf());
    Ok(problem)
}

/// A problem file that could not be loaded.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    pub path: PathBuf,
    pub message: String,
}

/// The in-memory set of problems for a session.
#[derive(Debug, Default)]
pub struct ProblemStore {
    problems: Vec<Problem>,
    warnings: Vec<LoadWarning>,
}

impl ProblemStore {
    /// Load every problem file in `dir`.
    ///
    /// Malformed files are skipped and recorded as warnings, as is any file
    /// whose id an earlier file (in name order) already uses. The rest are
    /// sorted ascending by id.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut problems = Vec::new();
        let mut warnings = Vec::new();
        let mut owners: HashMap<u32, PathBuf> = HashMap::new();

        for path in problem_files(dir)? {
            let result = parse_problem(&path).and_then(|problem| match owners.get(&problem.id) {
                Some(first) => Err(StoreError::DuplicateId {
                    id: problem.id,
                    first: first.clone(),
                }
                .into()),
                None => Ok(problem),
            });

            match result {
                Ok(problem) => {
                    owners.insert(problem.id, path);
                    problems.push(problem);
                }
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                    warnings.push(LoadWarning {
                        path,
                        message: format!("{e:#}"),
                    });
                }
            }
        }

        tracing::debug!(
            "loaded {} problems from {} ({} skipped)",
            problems.len(),
            dir.display(),
            warnings.len()
        );

        let mut store = Self::from_problems(problems);
        store.warnings = warnings;
        Ok(store)
    }

    /// Build a store from already-parsed problems.
    pub fn from_problems(mut problems: Vec<Problem>) -> Self {
        problems.sort_by_key(|p| p.id);
        Self {
            problems,
            warnings: Vec::new(),
        }
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    pub fn get(&self, id: u32) -> Option<&Problem> {
        self.problems.iter().find(|p| p.id == id)
    }

    /// Change a problem's completion status and persist it to its file.
    ///
    /// Only the `completion` field of the file is rewritten.
    pub fn set_completion(&mut self, id: u32, completion: Completion) -> Result<()> {
        let problem = self
            .problems
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::ProblemNotFound(id))?;

        if problem.completion == completion {
            return Ok(());
        }

        match &problem.source {
            Some(path) => {
                update_field(path, "completion", Value::from(completion.as_str()))?;
                tracing::info!("problem {id} marked {}", completion.as_str());
            }
            None => tracing::debug!("problem {id} has no backing file, not persisting"),
        }
        problem.completion = completion;
        Ok(())
    }
}

/// One identifier reassignment made by [`repair_ids`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdChange {
    pub path: PathBuf,
    pub old: u64,
    pub new: u64,
}

/// Outcome of [`repair_ids`].
#[derive(Debug, Default)]
pub struct RepairReport {
    pub changes: Vec<IdChange>,
    pub skipped: Vec<LoadWarning>,
}

impl RepairReport {
    pub fn repaired(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Give every duplicated problem id a new value.
///
/// Files are visited in name order. A file whose id was already seen gets
/// `id + 1` and is rewritten. This is a single pass: reassigned ids are not
/// checked again, so a cascade of collisions may need another run.
pub fn repair_ids(dir: &Path) -> Result<RepairReport> {
    let mut report = RepairReport::default();
    let mut seen = HashSet::new();

    for path in problem_files(dir)? {
        let (format, mut doc) = match read_document(&path) {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", path.display(), e);
                report.skipped.push(LoadWarning {
                    path,
                    message: format!("{e:#}"),
                });
                continue;
            }
        };

        let Some(id) = doc.get("id").and_then(Value::as_u64) else {
            let e = StoreError::MissingId(path.clone());
            tracing::warn!("{e}");
            report.skipped.push(LoadWarning {
                path,
                message: e.to_string(),
            });
            continue;
        };

        if seen.insert(id) {
            continue;
        }

        let new = id + 1;
        doc["id"] = Value::from(new);
        write_document(&path, format, &doc)?;
        tracing::info!("reassigned {} from id {id} to {new}", path.display());
        report.changes.push(IdChange {
            path,
            old: id,
            new,
        });
    }

    Ok(report)
}
