//! Interactive session: the listing/detail state machine.

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use thiserror::Error;

use termcode_core::error::RunnerError;
use termcode_core::model::{Completion, Problem};
use termcode_core::solution::SolutionStore;
use termcode_core::store::ProblemStore;
use termcode_core::traits::{Editor, RunRequest, SolutionRunner};

use crate::highlight::Highlighter;
use crate::render;

/// Invalid input at a prompt. Shown inline; the session continues.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Unknown problem: {0}")]
    UnknownProblem(u32),
    #[error("Unknown input: {0:?}")]
    Unrecognized(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListingCommand {
    Select(u32),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailCommand {
    Write,
    Test,
    Return,
    Quit,
}

fn parse_listing(input: &str) -> Result<ListingCommand, InputError> {
    let input = input.trim().to_lowercase();
    if input == "q" {
        return Ok(ListingCommand::Quit);
    }
    input
        .parse()
        .map(ListingCommand::Select)
        .map_err(|_| InputError::Unrecognized(input))
}

fn parse_detail(input: &str) -> Result<DetailCommand, InputError> {
    match input.trim().to_lowercase().as_str() {
        "w" => Ok(DetailCommand::Write),
        "t" => Ok(DetailCommand::Test),
        "r" => Ok(DetailCommand::Return),
        "q" => Ok(DetailCommand::Quit),
        other => Err(InputError::Unrecognized(other.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Quit,
}

/// Tunables for a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// How long inline errors stay on screen before the redraw.
    pub error_pause: Duration,
    /// Time limit passed to the runner.
    pub timeout_secs: u64,
    /// Clear the terminal before each screen.
    pub clear_screen: bool,
    /// Syntax-highlight sample values.
    pub highlight: bool,
}

impl SessionOptions {
    pub fn interactive(timeout_secs: u64) -> Self {
        Self {
            error_pause: Duration::from_secs(1),
            timeout_secs,
            clear_screen: true,
            highlight: true,
        }
    }
}

/// Everything the running program knows: loaded problems, the current
/// problem, and the in-memory solution text.
pub struct Session<R, W> {
    store: ProblemStore,
    solutions: SolutionStore,
    editor: Box<dyn Editor>,
    runner: Arc<dyn SolutionRunner>,
    input: R,
    output: W,
    options: SessionOptions,
    highlighter: Option<Highlighter>,
    current: Option<u32>,
    solution_text: Option<String>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        store: ProblemStore,
        solutions: SolutionStore,
        editor: Box<dyn Editor>,
        runner: Arc<dyn SolutionRunner>,
        input: R,
        output: W,
        options: SessionOptions,
    ) -> Self {
        let highlighter = options.highlight.then(Highlighter::new);
        Self {
            store,
            solutions,
            editor,
            runner,
            input,
            output,
            options,
            highlighter,
            current: None,
            solution_text: None,
        }
    }

    pub fn store(&self) -> &ProblemStore {
        &self.store
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn current_problem(&self) -> Option<u32> {
        self.current
    }

    pub fn solution_text(&self) -> Option<&str> {
        self.solution_text.as_deref()
    }

    /// Run until the user quits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let step = match self.current {
                None => self.listing_step().await?,
                Some(id) => self.detail_step(id).await?,
            };
            if step == Step::Quit {
                break;
            }
        }
        self.clear()?;
        Ok(())
    }

    async fn listing_step(&mut self) -> Result<Step> {
        self.clear()?;
        render::listing(&mut self.output, &self.store)?;

        let Some(choice) = self.prompt()? else {
            return Ok(Step::Quit);
        };

        match parse_listing(&choice) {
            Ok(ListingCommand::Quit) => return Ok(Step::Quit),
            Ok(ListingCommand::Select(id)) if self.store.get(id).is_some() => {
                tracing::debug!("selected problem {id}");
                self.current = Some(id);
            }
            Ok(ListingCommand::Select(id)) => {
                self.show_transient(&InputError::UnknownProblem(id).to_string())
                    .await?
            }
            Err(e) => self.show_transient(&e.to_string()).await?,
        }
        Ok(Step::Continue)
    }

    async fn detail_step(&mut self, id: u32) -> Result<Step> {
        let Some(problem) = self.store.get(id).cloned() else {
            self.current = None;
            return Ok(Step::Continue);
        };

        self.clear()?;
        render::detail(&mut self.output, &problem, self.highlighter.as_ref())?;

        let Some(choice) = self.prompt()? else {
            return Ok(Step::Quit);
        };

        let action = match parse_detail(&choice) {
            Ok(DetailCommand::Quit) => return Ok(Step::Quit),
            Ok(DetailCommand::Return) => {
                self.current = None;
                self.solution_text = None;
                return Ok(Step::Continue);
            }
            Ok(DetailCommand::Write) => self.write_solution(&problem),
            Ok(DetailCommand::Test) => self.test_solution(&problem).await,
            Err(e) => {
                self.show_transient(&e.to_string()).await?;
                return Ok(Step::Continue);
            }
        };

        if let Err(e) = action {
            tracing::warn!("problem {id}: {e:#}");
            self.show_transient(&format!("{e:#}")).await?;
        }
        Ok(Step::Continue)
    }

    fn write_solution(&mut self, problem: &Problem) -> Result<()> {
        let path = self.solutions.prepare(problem)?;
        self.editor.edit(&path)?;
        self.solution_text = Some(self.solutions.read(&path)?);

        if problem.completion == Completion::NotStarted {
            self.store
                .set_completion(problem.id, Completion::InProgress)?;
        }
        Ok(())
    }

    async fn test_solution(&mut self, problem: &Problem) -> Result<()> {
        self.clear()?;
        render::banner(&mut self.output)?;
        writeln!(self.output, "Running tests...\n")?;
        self.output.flush()?;

        let code = match &self.solution_text {
            Some(text) => Some(text.clone()),
            None => self.solutions.existing(problem)?,
        };
        let Some(code) = code.filter(|c| !c.trim().is_empty()) else {
            writeln!(self.output, "No solution provided yet!")?;
            return self.wait_for_enter();
        };

        let result = match RunRequest::for_problem(problem, code, self.options.timeout_secs) {
            Ok(request) => self.runner.run(&request).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(run) => {
                render::test_run(&mut self.output, &run)?;
                if run.all_passed() {
                    self.store.set_completion(problem.id, Completion::Done)?;
                }
            }
            Err(e) => {
                writeln!(self.output, "{}", format!("Could not run tests: {e:#}").red())?;
                if e.downcast_ref::<RunnerError>().is_some_and(RunnerError::is_permanent) {
                    writeln!(
                        self.output,
                        "Check that python3 is installed and the problem's template declares a function."
                    )?;
                }
            }
        }

        self.wait_for_enter()
    }

    /// Print the prompt and read one line. `None` at end of input.
    fn prompt(&mut self) -> Result<Option<String>> {
        write!(self.output, "\nEnter your choice: ")?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn wait_for_enter(&mut self) -> Result<()> {
        write!(self.output, "\nPress Enter to continue...")?;
        self.output.flush()?;
        self.read_line()?;
        Ok(())
    }

    async fn show_transient(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message.red())?;
        self.output.flush()?;
        tokio::time::sleep(self.options.error_pause).await;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.options.clear_screen {
            render::clear_screen(&mut self.output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::Path;

    use serde_json::json;
    use termcode_core::model::{Difficulty, TestCase};
    use termcode_core::results::{CaseOutcome, CaseResult, TestRun};
    use termcode_runner::MockRunner;

    /// Writes a fixed solution into whatever file it is asked to edit.
    struct ScriptedEditor {
        contents: String,
    }

    impl Editor for ScriptedEditor {
        fn edit(&self, path: &Path) -> anyhow::Result<()> {
            std::fs::write(path, &self.contents)?;
            Ok(())
        }
    }

    struct BrokenEditor;

    impl Editor for BrokenEditor {
        fn edit(&self, _path: &Path) -> anyhow::Result<()> {
            anyhow::bail!("editor `nope` exited with status 1")
        }
    }

    fn options() -> SessionOptions {
        SessionOptions {
            error_pause: Duration::ZERO,
            timeout_secs: 5,
            clear_screen: false,
            highlight: false,
        }
    }

    fn write_problem(dir: &Path, id: u32, title: &str, difficulty: &str) {
        let doc = json!({
            "id": id,
            "title": title,
            "difficulty": difficulty,
            "description": "Add two numbers.",
            "function_template": "def add(a, b):\n    pass\n",
            "test_cases": [
                {"inputs": [2, 3], "expected_output": 5},
                {"inputs": [1, 1], "expected_output": 2}
            ],
            "completion": "no"
        });
        std::fs::write(dir.join(format!("{id}.json")), doc.to_string()).unwrap();
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        problems: std::path::PathBuf,
        solutions: std::path::PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let problems = dir.path().join("problems");
        let solutions = dir.path().join("solutions");
        std::fs::create_dir_all(&problems).unwrap();
        write_problem(&problems, 1, "add", "easy");
        write_problem(&problems, 2, "add again", "hard");
        Fixture {
            _dir: dir,
            problems,
            solutions,
        }
    }

    fn session(
        fx: &Fixture,
        editor: Box<dyn Editor>,
        runner: Arc<dyn SolutionRunner>,
        input: &str,
    ) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(
            ProblemStore::load(&fx.problems).unwrap(),
            SolutionStore::new(&fx.solutions),
            editor,
            runner,
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            options(),
        )
    }

    fn text<R: BufRead>(session: &Session<R, Vec<u8>>) -> String {
        String::from_utf8_lossy(session.output()).to_string()
    }

    fn scripted(contents: &str) -> Box<dyn Editor> {
        Box::new(ScriptedEditor {
            contents: contents.to_string(),
        })
    }

    #[test]
    fn parse_commands() {
        assert_eq!(parse_listing(" Q "), Ok(ListingCommand::Quit));
        assert_eq!(parse_listing("12"), Ok(ListingCommand::Select(12)));
        assert_eq!(
            parse_listing("abc"),
            Err(InputError::Unrecognized("abc".into()))
        );
        assert_eq!(parse_detail("W"), Ok(DetailCommand::Write));
        assert_eq!(parse_detail("r"), Ok(DetailCommand::Return));
        assert!(parse_detail("x").is_err());
    }

    #[tokio::test]
    async fn quit_from_listing() {
        let fx = fixture();
        let mut s = session(&fx, scripted(""), Arc::new(MockRunner::new()), "q\n");
        s.run().await.unwrap();

        let out = text(&s);
        assert!(out.contains("Available Problems"));
        assert!(out.contains("Add again"));
        assert!(s.current_problem().is_none());
    }

    #[tokio::test]
    async fn end_of_input_quits() {
        let fx = fixture();
        let mut s = session(&fx, scripted(""), Arc::new(MockRunner::new()), "");
        s.run().await.unwrap();
    }

    #[tokio::test]
    async fn invalid_selection_stays_on_listing() {
        let fx = fixture();
        let mut s = session(
            &fx,
            scripted(""),
            Arc::new(MockRunner::new()),
            "42\nabc\nq\n",
        );
        s.run().await.unwrap();

        let out = text(&s);
        assert!(out.contains("Unknown problem: 42"));
        assert!(out.contains("Unknown input: \"abc\""));
        assert!(!out.contains("Options:"));
    }

    #[tokio::test]
    async fn select_then_return_clears_state() {
        let fx = fixture();
        let mut s = session(
            &fx,
            scripted("def add(a, b):\n    return a + b\n"),
            Arc::new(MockRunner::new()),
            "1\nw\nr\nq\n",
        );
        s.run().await.unwrap();

        let out = text(&s);
        assert!(out.contains("Problem 1"));
        assert!(out.contains("w. Write solution"));
        assert!(s.current_problem().is_none());
        assert!(s.solution_text().is_none());
    }

    #[tokio::test]
    async fn write_marks_in_progress_and_keeps_text() {
        let fx = fixture();
        let code = "def add(a, b):\n    return a + b\n";
        let mut s = session(&fx, scripted(code), Arc::new(MockRunner::new()), "1\nw\nq\n");
        s.run().await.unwrap();

        assert_eq!(s.solution_text(), Some(code));
        assert_eq!(
            s.store().get(1).unwrap().completion,
            Completion::InProgress
        );
        let saved = std::fs::read_to_string(fx.solutions.join("problem_1_solution.py")).unwrap();
        assert_eq!(saved, code);

        let file = std::fs::read_to_string(fx.problems.join("1.json")).unwrap();
        assert!(file.contains("\"incomplete\""));
    }

    #[tokio::test]
    async fn passing_run_marks_done() {
        let fx = fixture();
        let runner = Arc::new(MockRunner::new());
        let code = "def add(a, b):\n    return a + b\n";
        let mut s = session(&fx, scripted(code), runner.clone(), "1\nw\nt\n\nq\n");
        s.run().await.unwrap();

        let out = text(&s);
        assert!(out.contains("Congratulations! All test cases passed!"));
        assert!(s.store().get(1).unwrap().is_done());

        let requests = runner.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].function_name, "add");
        assert_eq!(requests[0].code, code);
        assert_eq!(requests[0].test_cases.len(), 2);
        assert_eq!(requests[0].timeout_secs, 5);
    }

    #[tokio::test]
    async fn failing_run_reports_and_keeps_status() {
        let fx = fixture();
        let runner = Arc::new(MockRunner::new());
        runner.push(TestRun::completed(
            vec![
                CaseResult {
                    inputs: vec![json!(2), json!(3)],
                    expected: json!(5),
                    outcome: CaseOutcome::Passed,
                    actual: Some("5".into()),
                    error: None,
                    stdout: String::new(),
                },
                CaseResult {
                    inputs: vec![json!(1), json!(1)],
                    expected: json!(2),
                    outcome: CaseOutcome::Errored,
                    actual: None,
                    error: Some("TypeError: boom".into()),
                    stdout: String::new(),
                },
            ],
            3,
        ));
        let mut s = session(&fx, scripted("x"), runner, "1\nw\nt\n\nq\n");
        s.run().await.unwrap();

        let out = text(&s);
        assert!(out.contains("✗ Error: TypeError: boom"));
        assert!(out.contains("Keep trying"));
        assert_eq!(
            s.store().get(1).unwrap().completion,
            Completion::InProgress
        );
    }

    #[tokio::test]
    async fn test_without_solution() {
        let fx = fixture();
        let runner = Arc::new(MockRunner::new());
        let mut s = session(&fx, scripted(""), runner.clone(), "2\nt\n\nq\n");
        s.run().await.unwrap();

        assert!(text(&s).contains("No solution provided yet!"));
        assert!(runner.requests().is_empty());
    }

    #[tokio::test]
    async fn blank_solution_is_not_run() {
        let fx = fixture();
        let runner = Arc::new(MockRunner::new());
        let mut s = session(&fx, scripted("  \n\n"), runner.clone(), "1\nw\nt\n\nq\n");
        s.run().await.unwrap();

        assert!(text(&s).contains("No solution provided yet!"));
        assert!(runner.requests().is_empty());
    }

    #[tokio::test]
    async fn test_uses_existing_solution_file() {
        let fx = fixture();
        std::fs::create_dir_all(&fx.solutions).unwrap();
        std::fs::write(fx.solutions.join("problem_2_solution.py"), "saved earlier").unwrap();

        let runner = Arc::new(MockRunner::new());
        let mut s = session(&fx, scripted(""), runner.clone(), "2\nt\n\nq\n");
        s.run().await.unwrap();

        assert_eq!(runner.requests()[0].code, "saved earlier");
    }

    #[tokio::test]
    async fn editor_failure_is_reported_inline() {
        let fx = fixture();
        let mut s = session(&fx, Box::new(BrokenEditor), Arc::new(MockRunner::new()), "1\nw\nq\n");
        s.run().await.unwrap();

        assert!(text(&s).contains("exited with status 1"));
        assert!(s.solution_text().is_none());
        assert_eq!(
            s.store().get(1).unwrap().completion,
            Completion::NotStarted
        );
    }

    #[tokio::test]
    async fn template_without_function_is_reported() {
        let problem = Problem {
            id: 9,
            title: "broken".into(),
            difficulty: Difficulty::Easy,
            description: String::new(),
            function_template: "# nothing here".into(),
            test_cases: vec![TestCase {
                inputs: vec![json!(1)],
                expected_output: json!(1),
            }],
            completion: Completion::NotStarted,
            source: None,
        };
        let dir = tempfile::tempdir().unwrap();
        let runner = Arc::new(MockRunner::new());
        let mut s = Session::new(
            ProblemStore::from_problems(vec![problem]),
            SolutionStore::new(dir.path()),
            scripted("print('hi')"),
            runner.clone(),
            Cursor::new(b"9\nw\nt\n\nq\n".to_vec()),
            Vec::new(),
            options(),
        );
        s.run().await.unwrap();

        let out = text(&s);
        assert!(out.contains("does not declare a function"));
        assert!(runner.requests().is_empty());
    }
}
