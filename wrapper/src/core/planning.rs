//! Pure extraction from GSD planning documents.
//!
//! All extractors take document text (already read by the caller) and return
//! `None` when the pattern is absent. The banner builder treats every `None`
//! as "no contribution"; nothing here is an error.

use std::sync::LazyLock;

use regex::Regex;

/// Delimiter between banner contributions.
pub const BANNER_DELIMITER: &str = " | ";

/// Longest milestone text carried into the banner.
const MILESTONE_MAX_CHARS: usize = 40;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").expect("valid title regex"));

static PHASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Current Phase[:\s]+(\d+)").expect("valid phase regex"));

static MILESTONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^##\s+Current Milestone[:\s]*(\S[^\n]*)$").expect("valid milestone regex")
});

/// First top-level heading (`# <text>`) in a project document.
pub fn project_title(doc: &str) -> Option<String> {
    let captures = TITLE_RE.captures(doc)?;
    let title = captures.get(1)?.as_str().trim();
    if title.is_empty() {
        return None;
    }
    Some(title.to_string())
}

/// First integer following a case-insensitive `Current Phase` label.
pub fn current_phase(doc: &str) -> Option<u32> {
    let captures = PHASE_RE.captures(doc)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Text after a case-insensitive `## Current Milestone` heading, truncated.
pub fn current_milestone(doc: &str) -> Option<String> {
    let captures = MILESTONE_RE.captures(doc)?;
    let milestone: String = captures
        .get(1)?
        .as_str()
        .trim()
        .chars()
        .take(MILESTONE_MAX_CHARS)
        .collect();
    if milestone.is_empty() {
        return None;
    }
    Some(milestone)
}

/// `(done, total)` todo counts from a JSON array of `{"done": bool, ...}`.
pub fn todo_counts(doc: &str) -> Option<(usize, usize)> {
    let todos: Vec<serde_json::Value> = serde_json::from_str(doc).ok()?;
    let total = todos.len();
    let done = todos
        .iter()
        .filter(|todo| todo.get("done").and_then(serde_json::Value::as_bool) == Some(true))
        .count();
    Some((done, total))
}

/// Join non-empty contributions with [`BANNER_DELIMITER`]; `None` if empty.
pub fn compose_banner(parts: &[String]) -> Option<String> {
    let parts: Vec<&str> = parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join(BANNER_DELIMITER))
}
