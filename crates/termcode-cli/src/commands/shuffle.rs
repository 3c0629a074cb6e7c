//! `termcode --shuffle`: repair duplicate problem ids.

use anyhow::Result;
use crossterm::style::Stylize;

use termcode_core::layout::Layout;
use termcode_core::store::repair_ids;

pub fn execute(layout: &Layout) -> Result<()> {
    layout.ensure()?;
    let report = repair_ids(&layout.problems_dir())?;

    if report.repaired() {
        println!(
            "{}",
            "Duplicate IDs detected!\nID numbers reshuffled successfully!".green()
        );
        for change in &report.changes {
            println!("  {}: {} -> {}", change.path.display(), change.old, change.new);
        }
    } else {
        println!("No duplicate IDs detected!");
    }

    for skipped in &report.skipped {
        eprintln!("Skipped {}: {}", skipped.path.display(), skipped.message);
    }
    Ok(())
}
