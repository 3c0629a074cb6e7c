//! `termcode --template`: download the problem-authoring template.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use termcode_core::config::load_config_or_default;
use termcode_core::layout::Layout;
use termcode_core::traits::Editor;

use crate::editor::SystemEditor;

/// Where the upstream template lives.
pub const TEMPLATE_URL: &str =
    "https://raw.githubusercontent.com/sjapanwala/termcode/main/problems/template.json";

const FETCH_TIMEOUT_SECS: u64 = 30;

pub async fn execute(layout: &Layout, url: &str) -> Result<()> {
    layout.ensure()?;
    let dest = layout.creations_dir().join("template.json");

    let body = fetch_template(url, &dest).await?;
    println!("{body}");
    println!("\nSaved to {}", dest.display());

    let config = load_config_or_default(&layout.config_path());
    SystemEditor::new(config.resolve_editor()).edit(&dest)
}

/// Download the template from `url`, check that it is JSON, and write it to
/// `dest`. Returns the text written.
pub async fn fetch_template(url: &str, dest: &Path) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .context("failed to build HTTP client")?;

    tracing::debug!("fetching template from {url}");
    let body = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("failed to fetch template from {url}"))?
        .error_for_status()
        .with_context(|| format!("failed to fetch template from {url}"))?
        .text()
        .await
        .context("failed to read template body")?;

    let doc: serde_json::Value =
        serde_json::from_str(&body).context("downloaded template is not valid JSON")?;
    let pretty = serde_json::to_string_pretty(&doc)?;

    std::fs::write(dest, &pretty)
        .with_context(|| format!("failed to write template: {}", dest.display()))?;
    Ok(pretty)
}
