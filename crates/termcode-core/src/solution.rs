//! Solution store: one editable Python file per problem.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::Problem;

/// Where solution files live.
#[derive(Debug, Clone)]
pub struct SolutionStore {
    dir: PathBuf,
}

impl SolutionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the solution file for `problem`, whether or not it exists.
    pub fn path_for(&self, problem: &Problem) -> PathBuf {
        self.dir.join(format!("problem_{}_solution.py", problem.id))
    }

    /// Return the solution path, seeding it with the starter code if the
    /// file does not exist yet.
    pub fn prepare(&self, problem: &Problem) -> Result<PathBuf> {
        let path = self.path_for(problem);
        if !path.exists() {
            std::fs::create_dir_all(&self.dir).with_context(|| {
                format!("failed to create solutions directory: {}", self.dir.display())
            })?;
            std::fs::write(&path, &problem.function_template)
                .with_context(|| format!("failed to create solution: {}", path.display()))?;
            tracing::debug!("seeded {} with starter code", path.display());
        }
        Ok(path)
    }

    /// Read the full solution text.
    pub fn read(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read solution: {}", path.display()))
    }

    /// Text of an existing solution file, if one has been created.
    pub fn existing(&self, problem: &Problem) -> Result<Option<String>> {
        let path = self.path_for(problem);
        if !path.exists() {
            return Ok(None);
        }
        self.read(&path).map(Some)
    }
}
