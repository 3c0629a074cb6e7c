//! termcode CLI — practice coding problems in the terminal.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};

use termcode_core::layout::Layout;
use termcode_runner::{DEFAULT_INTERPRETER, DEFAULT_TIMEOUT_SECS};

mod commands;
mod editor;
mod highlight;
mod render;
mod session;

const STORAGE_NOTES: &str = "\
Storage:
  ~/.termcode/problems/            problem files (.json or .toml)
  ~/.termcode/solutions/           your solutions, one file per problem
  ~/.termcode/creations/           downloaded templates for new problems
  ~/.termcode/.config.json         settings (editor)

Run without flags to start practicing.
https://github.com/sjapanwala/termcode";

#[derive(Parser)]
#[command(
    name = "termcode",
    version,
    about = "Practice coding problems in your terminal",
    after_help = STORAGE_NOTES
)]
#[command(group(ArgGroup::new("action").args(["editor", "template", "shuffle"])))]
struct Cli {
    /// Open the settings file in your editor
    #[arg(long)]
    editor: bool,

    /// Download a template for writing your own problems
    #[arg(long)]
    template: bool,

    /// Fix duplicate problem IDs
    #[arg(long)]
    shuffle: bool,

    /// Base directory (default: ~/.termcode)
    #[arg(long, env = "TERMCODE_HOME")]
    home: Option<PathBuf>,

    /// Time limit for a test run, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Python interpreter used to run solutions
    #[arg(long, env = "TERMCODE_PYTHON", default_value = DEFAULT_INTERPRETER)]
    python: String,

    /// Where `--template` downloads from
    #[arg(
        long,
        env = "TERMCODE_TEMPLATE_URL",
        default_value = commands::template::TEMPLATE_URL,
        hide = true
    )]
    template_url: String,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("termcode=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_layout(home: Option<PathBuf>) -> Result<Layout> {
    match home {
        Some(base) => Ok(Layout::new(base)),
        None => Layout::default_location().context("could not determine your home directory"),
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let layout = resolve_layout(cli.home)?;
    tracing::debug!("using {}", layout.base().display());

    if cli.editor {
        commands::edit_config::execute(&layout)
    } else if cli.template {
        commands::template::execute(&layout, &cli.template_url).await
    } else if cli.shuffle {
        commands::shuffle::execute(&layout)
    } else {
        commands::play::execute(&layout, cli.timeout, &cli.python).await
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = dispatch(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
