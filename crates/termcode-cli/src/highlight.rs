//! Terminal syntax highlighting for Python snippets.

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

const THEME_NAME: &str = "base16-ocean.dark";
const RESET: &str = "\x1b[0m";

pub struct Highlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    pub fn new() -> Self {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        let mut themes = ThemeSet::load_defaults();
        let theme = themes.themes.remove(THEME_NAME).unwrap_or_default();
        Self { syntaxes, theme }
    }

    /// Highlight `code` as Python, falling back to the plain text.
    pub fn python(&self, code: &str) -> String {
        let Some(syntax) = self.syntaxes.find_syntax_by_extension("py") else {
            return code.to_string();
        };

        let mut lines = HighlightLines::new(syntax, &self.theme);
        let mut out = String::new();
        for line in LinesWithEndings::from(code) {
            match lines.highlight_line(line, &self.syntaxes) {
                Ok(ranges) => out.push_str(&as_24_bit_terminal_escaped(&ranges[..], false)),
                Err(e) => {
                    tracing::debug!("highlighting failed: {e}");
                    return code.to_string();
                }
            }
        }
        out.push_str(RESET);
        out
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}
