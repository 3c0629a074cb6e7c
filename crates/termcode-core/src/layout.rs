//! On-disk layout of the termcode base directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Name of the base directory under the user's home.
pub const BASE_DIR_NAME: &str = ".termcode";

/// Paths of everything termcode keeps on disk.
///
/// ```text
/// ~/.termcode/
///   problems/      problem definitions
///   solutions/     one solution file per problem
///   creations/     downloaded templates for new problems
///   .config.json   editor setting
/// ```
#[derive(Debug, Clone)]
pub struct Layout {
    base: PathBuf,
}

impl Layout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// `~/.termcode`, or `None` when the home directory is unknown.
    pub fn default_location() -> Option<Self> {
        dirs::home_dir().map(|home| Self::new(home.join(BASE_DIR_NAME)))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn problems_dir(&self) -> PathBuf {
        self.base.join("problems")
    }

    pub fn solutions_dir(&self) -> PathBuf {
        self.base.join("solutions")
    }

    pub fn creations_dir(&self) -> PathBuf {
        self.base.join("creations")
    }

    pub fn config_path(&self) -> PathBuf {
        self.base.join(".config.json")
    }

    /// Create the base directory and its subdirectories if missing.
    pub fn ensure(&self) -> Result<()> {
        for dir in [
            self.base.clone(),
            self.problems_dir(),
            self.solutions_dir(),
            self.creations_dir(),
        ] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }
}
