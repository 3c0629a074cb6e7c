//! `termcode --editor`: open the config file for editing.

use anyhow::{Context, Result};

use termcode_core::config::{load_config_or_default, TermcodeConfig};
use termcode_core::layout::Layout;
use termcode_core::traits::Editor;

use crate::editor::SystemEditor;

pub fn execute(layout: &Layout) -> Result<()> {
    layout.ensure()?;

    let path = layout.config_path();
    if !path.exists() {
        std::fs::write(&path, TermcodeConfig::template())
            .with_context(|| format!("failed to create config: {}", path.display()))?;
        println!("Created {}", path.display());
    }

    let config = load_config_or_default(&path);
    SystemEditor::new(config.resolve_editor()).edit(&path)
}
