//! Launching the user's text editor.

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};

use termcode_core::traits::Editor;

/// Runs an editor command line (e.g. `"code --wait"`) on a file and waits
/// for it to exit.
#[derive(Debug, Clone)]
pub struct SystemEditor {
    command: String,
}

impl SystemEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Editor for SystemEditor {
    fn edit(&self, path: &Path) -> Result<()> {
        let mut parts = self.command.split_whitespace();
        let Some(program) = parts.next() else {
            bail!("no editor configured");
        };

        tracing::debug!("opening {} with {}", path.display(), self.command);
        let status = Command::new(program)
            .args(parts)
            .arg(path)
            .status()
            .with_context(|| format!("failed to launch editor `{program}`"))?;

        if !status.success() {
            bail!("editor `{}` exited with {status}", self.command);
        }
        Ok(())
    }
}
