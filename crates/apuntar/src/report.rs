//! Renderings of an [`InteractionError`].
//!
//! - markdown for chat and log surfaces; a section appears only when its
//!   data is present
//! - JSON for programmatic consumers, with suggestions flattened to
//!   `{target, similarity, reason}`
//! - a single compact line for terse logs

use serde::Serialize;

use crate::element::{round_half_up, Frame};
use crate::interaction_error::{InteractionError, InteractionErrorCode};
use crate::result::ApuntarResult;
use crate::target::format_target;

/// Output rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Sectioned markdown
    #[default]
    Markdown,
    /// Pretty-printed JSON
    Json,
    /// One line
    Compact,
}

impl ReportFormat {
    /// Render `error` in this format
    pub fn render(self, error: &InteractionError) -> ApuntarResult<String> {
        match self {
            Self::Markdown => Ok(format_markdown(error)),
            Self::Json => format_json(error),
            Self::Compact => Ok(format_compact(error)),
        }
    }
}

fn format_position(frame: &Frame) -> String {
    format!(
        "({}, {}) {}x{}",
        round_half_up(frame.x),
        round_half_up(frame.y),
        round_half_up(frame.width),
        round_half_up(frame.height)
    )
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

/// Render as markdown
#[must_use]
pub fn format_markdown(error: &InteractionError) -> String {
    let mut md = format!("## {}\n\n", error.title);

    if let Some(target) = &error.target {
        md.push_str(&format!("**Target:** `{}`\n\n", format_target(target)));
    }

    md.push_str(&format!("**Error:** {} (`{}`)\n\n", error.message, error.code));

    if let Some(position) = &error.position {
        md.push_str(&format!("**Position:** {}\n\n", format_position(position)));
    }

    if let Some(suggestions) = error.suggestions.as_ref().filter(|s| !s.is_empty()) {
        md.push_str("### Suggestions\n\n");
        md.push_str("| Target | Similarity | Reason |\n");
        md.push_str("|--------|------------|--------|\n");
        for s in suggestions {
            md.push_str(&format!(
                "| `{}` | {}% | {} |\n",
                format_target(&s.target),
                s.similarity,
                escape_cell(&s.reason)
            ));
        }
        md.push('\n');
    }

    if !error.hint.is_empty() {
        md.push_str(&format!("**Hint:** {}\n\n", error.hint));
    }

    if let Some(action) = &error.suggested_action {
        md.push_str(&format!("**Suggested action:** {action}\n\n"));
    }

    if let Some(path) = &error.screenshot_path {
        md.push_str(&format!("**Screenshot:** `{}`\n\n", path.display()));
    }

    md.truncate(md.trim_end().len());
    md.push('\n');
    md
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSuggestion<'a> {
    target: String,
    similarity: u8,
    reason: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    code: InteractionErrorCode,
    title: &'a str,
    message: &'a str,
    hint: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestions: Option<Vec<JsonSuggestion<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggested_action: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<&'a Frame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    screenshot_path: Option<String>,
}

/// Render as pretty-printed JSON
pub fn format_json(error: &InteractionError) -> ApuntarResult<String> {
    let report = JsonReport {
        code: error.code,
        title: &error.title,
        message: &error.message,
        hint: &error.hint,
        target: error.target.as_ref().map(format_target),
        suggestions: error.suggestions.as_ref().map(|list| {
            list.iter()
                .map(|s| JsonSuggestion {
                    target: format_target(&s.target),
                    similarity: s.similarity,
                    reason: &s.reason,
                })
                .collect()
        }),
        suggested_action: error.suggested_action.as_deref(),
        position: error.position.as_ref(),
        screenshot_path: error.screenshot_path.as_ref().map(|p| p.display().to_string()),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Render as one line: `"{title}: {message}"`, plus the top suggestion
#[must_use]
pub fn format_compact(error: &InteractionError) -> String {
    match error.top_suggestion() {
        Some(top) => format!(
            "{}: {} (Did you mean: {}?)",
            error.title,
            error.message,
            format_target(&top.target)
        ),
        None => format!("{}: {}", error.title, error.message),
    }
}
