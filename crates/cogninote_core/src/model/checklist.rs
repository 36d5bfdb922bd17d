//! Checklist projection over note content.
//!
//! # Responsibility
//! - Extract `[ ] text` / `[x] text` lines from free-text note bodies.
//! - Rewrite a single checklist marker without disturbing other lines.
//!
//! # Invariants
//! - The store never enforces the checklist format; these helpers are a
//!   read/rewrite projection for consuming views.
//! - Toggling preserves line count and the content of all other lines.

use once_cell::sync::Lazy;
use regex::Regex;

static CHECKLIST_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[( |x|X)\] (.*)$").expect("valid checklist regex"));

/// One checklist line extracted from note content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    /// Zero-based line index inside the note content.
    pub line_index: usize,
    /// Marker state (`[x]` or `[X]`).
    pub completed: bool,
    /// Text following the marker. May be empty.
    pub text: String,
}

/// Extracts all checklist lines from note content in document order.
pub fn parse_checklist(content: &str) -> Vec<ChecklistItem> {
    content
        .lines()
        .enumerate()
        .filter_map(|(line_index, line)| {
            CHECKLIST_LINE_RE.captures(line).map(|caps| ChecklistItem {
                line_index,
                completed: caps[1].eq_ignore_ascii_case("x"),
                text: caps[2].to_string(),
            })
        })
        .collect()
}

/// Flips the checklist marker on one line.
///
/// Returns the rewritten content, or `None` when `line_index` is out of
/// range or the line is not a checklist line.
pub fn toggle_checklist_line(content: &str, line_index: usize) -> Option<String> {
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    let line = lines.get(line_index)?;
    let caps = CHECKLIST_LINE_RE.captures(line)?;

    let marker = if caps[1].eq_ignore_ascii_case("x") {
        "[ ] "
    } else {
        "[x] "
    };
    lines[line_index] = format!("{marker}{}", &caps[2]);
    Some(lines.join("\n"))
}
