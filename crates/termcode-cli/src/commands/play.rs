//! The default action: the interactive practice session.

use std::io;
use std::sync::Arc;

use anyhow::Result;

use termcode_core::config::load_config_or_default;
use termcode_core::layout::Layout;
use termcode_core::solution::SolutionStore;
use termcode_core::store::{repair_ids, ProblemStore};
use termcode_runner::LocalRunner;

use crate::editor::SystemEditor;
use crate::session::{Session, SessionOptions};

pub async fn execute(layout: &Layout, timeout_secs: u64, interpreter: &str) -> Result<()> {
    layout.ensure()?;

    let repair = repair_ids(&layout.problems_dir())?;
    for change in &repair.changes {
        tracing::info!(
            "reassigned {} from id {} to {}",
            change.path.display(),
            change.old,
            change.new
        );
    }

    let config = load_config_or_default(&layout.config_path());
    let editor = SystemEditor::new(config.resolve_editor());

    let store = ProblemStore::load(&layout.problems_dir())?;
    tracing::info!(
        "loaded {} problems from {}",
        store.problems().len(),
        layout.problems_dir().display()
    );

    let stdin = io::stdin();
    let mut session = Session::new(
        store,
        SolutionStore::new(layout.solutions_dir()),
        Box::new(editor),
        Arc::new(LocalRunner::new().with_interpreter(interpreter)),
        stdin.lock(),
        io::stdout(),
        SessionOptions::interactive(timeout_secs),
    );
    session.run().await?;

    let store = session.store();
    tracing::info!(
        "{} of {} problems completed",
        store.problems().iter().filter(|p| p.is_done()).count(),
        store.problems().len()
    );
    Ok(())
}
