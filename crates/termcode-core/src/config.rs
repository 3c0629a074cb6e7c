//! termcode configuration.
//!
//! The config file is `~/.termcode/.config.json`. It is only ever written
//! by the user through their editor (`termcode --editor`); the running
//! program reads it once at startup.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Editor used when neither `$EDITOR` nor the config names one.
pub const DEFAULT_EDITOR: &str = "vi";

/// Environment variable that overrides the configured editor.
pub const EDITOR_ENV: &str = "EDITOR";

/// Top-level termcode configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermcodeConfig {
    /// Preferred editor command, e.g. `"nvim"` or `"code --wait"`.
    #[serde(default)]
    pub editor: Option<String>,
}

impl TermcodeConfig {
    /// Editor command to run: `$EDITOR`, then the stored editor, then `vi`.
    pub fn resolve_editor(&self) -> String {
        self.resolve_editor_with(std::env::var(EDITOR_ENV).ok())
    }

    /// Like [`resolve_editor`](Self::resolve_editor) with an explicit
    /// environment value.
    pub fn resolve_editor_with(&self, env_editor: Option<String>) -> String {
        env_editor
            .filter(|e| !e.trim().is_empty())
            .or_else(|| self.editor.clone().filter(|e| !e.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
    }

    /// Contents written to a fresh config file.
    pub fn template() -> String {
        let config = TermcodeConfig {
            editor: Some(DEFAULT_EDITOR.to_string()),
        };
        // A struct of plain strings always serializes.
        serde_json::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Load the config file at `path`.
pub fn load_config(path: &Path) -> Result<TermcodeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Load the config file, falling back to defaults if it is missing or
/// unreadable.
pub fn load_config_or_default(path: &Path) -> TermcodeConfig {
    if !path.exists() {
        return TermcodeConfig::default();
    }
    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("error loading config: {e:#}. Using default editor ({DEFAULT_EDITOR})");
            TermcodeConfig::default()
        }
    }
}
