//! Screens drawn by the interactive session.

use std::io::{self, Write};

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, Table};
use crossterm::cursor::MoveTo;
use crossterm::style::{StyledContent, Stylize};
use crossterm::terminal::{Clear, ClearType};
use serde_json::Value;

use termcode_core::listing::listing_order;
use termcode_core::model::{Completion, Difficulty, Problem};
use termcode_core::results::{CaseOutcome, RunOutcome, TestRun};
use termcode_core::store::ProblemStore;

use crate::highlight::Highlighter;

/// Number of test cases shown on the detail screen.
const SAMPLE_CASES: usize = 2;

pub fn clear_screen(out: &mut impl Write) -> io::Result<()> {
    crossterm::execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}

pub fn banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}{}", "╔╦╗╔═╗╦═╗╔╦╗".dark_grey(), "╔═╗╔═╗╔╦╗╔═╗".yellow())?;
    writeln!(out, "{}{}", " ║ ║╣ ╠╦╝║║║".dark_grey(), "║  ║ ║ ║║║╣ ".yellow())?;
    writeln!(out, "{}{}", " ╩ ╚═╝╩╚═╩ ╩".dark_grey(), "╚═╝╚═╝═╩╝╚═╝".yellow())?;
    writeln!(out)
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}

fn styled_difficulty(difficulty: Difficulty) -> StyledContent<String> {
    let text = difficulty.to_string();
    match difficulty {
        Difficulty::Easy => text.green(),
        Difficulty::Medium => text.yellow(),
        Difficulty::Hard => text.red(),
    }
}

fn completion_cell(completion: Completion) -> Cell {
    match completion {
        Completion::NotStarted => Cell::new("✗").fg(Color::Red),
        Completion::InProgress => Cell::new("⚠").fg(Color::Yellow),
        Completion::Done => Cell::new("✓").fg(Color::Green),
    }
}

fn capitalize(title: &str) -> String {
    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The problem table, in listing order.
pub fn problem_table(store: &ProblemStore) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Problem Title", "Completion", "Difficulty"]);

    for problem in listing_order(store.problems()) {
        let mut title = Cell::new(capitalize(&problem.title));
        if problem.is_done() {
            title = title.add_attribute(Attribute::CrossedOut);
        }
        table.add_row(vec![
            Cell::new(problem.id),
            title,
            completion_cell(problem.completion),
            Cell::new(problem.difficulty).fg(difficulty_color(problem.difficulty)),
        ]);
    }
    table
}

pub fn listing(out: &mut impl Write, store: &ProblemStore) -> io::Result<()> {
    banner(out)?;
    writeln!(out, "{}\n", "Available Problems:".white())?;

    if store.problems().is_empty() {
        writeln!(out, "No problems found. Add problem files to ~/.termcode/problems/")?;
    } else {
        writeln!(out, "{}", problem_table(store))?;
    }

    if !store.warnings().is_empty() {
        writeln!(
            out,
            "\n{}",
            format!("Skipped {} problem file(s):", store.warnings().len()).red()
        )?;
        for warning in store.warnings() {
            writeln!(out, "  {}: {}", warning.path.display(), warning.message)?;
        }
    }

    writeln!(out, "\nEnter problem number to select, or 'q' to quit")
}

pub fn detail(
    out: &mut impl Write,
    problem: &Problem,
    highlighter: Option<&Highlighter>,
) -> io::Result<()> {
    let highlight = |text: String| match highlighter {
        Some(h) => h.python(&text),
        None => text,
    };

    banner(out)?;
    writeln!(
        out,
        "{} {}",
        format!("Problem {}", problem.id).dark_grey(),
        problem.title.as_str().blue()
    )?;
    writeln!(
        out,
        "{} {}",
        "Difficulty:".dark_grey(),
        styled_difficulty(problem.difficulty)
    )?;
    writeln!(out, "\n{}", "Description:".dark_grey())?;
    writeln!(out, "{}\n", problem.description.as_str().white())?;

    for (i, case) in problem.test_cases.iter().take(SAMPLE_CASES).enumerate() {
        writeln!(out, "Test Case {}:", i + 1)?;
        writeln!(
            out,
            "  {} {}",
            "Inputs:".dark_grey(),
            highlight(py_repr_list(&case.inputs))
        )?;
        writeln!(
            out,
            "  {} {}\n",
            "Expected:".dark_grey(),
            highlight(py_repr(&case.expected_output))
        )?;
    }

    writeln!(out, "\nOptions:")?;
    writeln!(out, "w. Write solution")?;
    writeln!(out, "t. Test solution")?;
    writeln!(out, "r. Return to problem list")?;
    writeln!(out, "q. Quit")
}

/// Per-case results and a summary line.
pub fn test_run(out: &mut impl Write, run: &TestRun) -> io::Result<()> {
    let cases = match &run.outcome {
        RunOutcome::LoadFailed { message } => {
            return writeln!(out, "{} {message}", "Error in your code:".red());
        }
        RunOutcome::Completed { cases } => cases,
    };

    for (i, case) in cases.iter().enumerate() {
        writeln!(out, "Test case {}:", i + 1)?;
        writeln!(out, "Input: {}", py_repr_list(&case.inputs))?;
        writeln!(out, "Expected: {}", py_repr(&case.expected))?;
        if let Some(actual) = &case.actual {
            writeln!(out, "Your output: {actual}")?;
        }
        if !case.stdout.is_empty() {
            writeln!(out, "{}", "Printed:".dark_grey())?;
            for line in case.stdout.lines() {
                writeln!(out, "  {line}")?;
            }
        }
        match case.outcome {
            CaseOutcome::Passed => writeln!(out, "{}", "✓ Passed".green())?,
            CaseOutcome::Failed => writeln!(out, "{}", "✗ Failed".red())?,
            CaseOutcome::Errored => writeln!(
                out,
                "{}",
                format!("✗ Error: {}", case.error.as_deref().unwrap_or("unknown error")).red()
            )?,
        }
        writeln!(out)?;
    }

    if run.all_passed() {
        writeln!(out, "{}", "Congratulations! All test cases passed!".green())?;
    } else {
        writeln!(out, "{}", "Some test cases failed. Keep trying!".yellow())?;
    }
    writeln!(
        out,
        "{}",
        format!(
            "{} passed, {} failed, {} errored ({}ms)",
            run.count(CaseOutcome::Passed),
            run.count(CaseOutcome::Failed),
            run.count(CaseOutcome::Errored),
            run.duration_ms
        )
        .dark_grey()
    )
}

/// Python literal syntax for a JSON value.
pub fn py_repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => py_str(s),
        Value::Array(items) => py_repr_list(items),
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", py_str(k), py_repr(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

fn py_repr_list(items: &[Value]) -> String {
    let items: Vec<String> = items.iter().map(py_repr).collect();
    format!("[{}]", items.join(", "))
}

fn py_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
