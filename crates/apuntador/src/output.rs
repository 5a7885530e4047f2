//! Output formatting

use apuntar::{format_target, SuggestedTarget};
use console::{style, Term};
use serde::{Deserialize, Serialize};

/// Output format for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Writes results to stdout and status lines to stderr
#[derive(Debug)]
pub struct Printer {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl Printer {
    /// Create a printer
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a command result; shown even in quiet mode
    pub fn result(&self, text: &str) {
        let _ = self.out.write_line(text.trim_end());
    }

    /// Print a success line
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "PASS".to_string()
        };
        let _ = self.out.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure line
    pub fn failure(&self, message: &str) {
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info line to stderr
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }
}

/// Render ranked suggestions as an aligned table
#[must_use]
pub fn render_suggestions_table(suggestions: &[SuggestedTarget], use_color: bool) -> String {
    if suggestions.is_empty() {
        return "No similar elements found".to_string();
    }

    let rows: Vec<(String, String, &str)> = suggestions
        .iter()
        .map(|s| (format_target(&s.target), format!("{}%", s.similarity), s.reason.as_str()))
        .collect();
    let target_width = rows.iter().map(|r| r.0.chars().count()).max().unwrap_or(0).max("TARGET".len());

    let header = format!("{:<target_width$}  {:>5}  REASON", "TARGET", "SCORE");
    let mut out = if use_color {
        style(header).bold().to_string()
    } else {
        header
    };
    out.push('\n');
    for (target, score, reason) in rows {
        out.push_str(&format!("{target:<target_width$}  {score:>5}  {reason}\n"));
    }
    out
}
