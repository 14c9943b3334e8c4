//! Markdown schedule summaries — a table per term, suitable for pasting
//! into an advising note. Same data the `text` reporter renders, formatted
//! for a renderer instead of a terminal.

use crate::types::{Schedule, TermEntry};
use std::fmt::Write as _;

/// Render `schedule` as one markdown section per term, with a bullet list
/// of its course keys.
pub fn render(schedule: &Schedule) -> String {
    let mut out = String::new();
    for (term, entry) in schedule.entries() {
        let _ = writeln!(out, "## {term}\n");
        if entry.is_empty() {
            let _ = writeln!(out, "_(empty)_\n");
            continue;
        }
        for key in entry.course_keys() {
            let _ = writeln!(out, "- {key}");
        }
        let _ = writeln!(out);
    }
    out
}

/// Render a markdown table of the chosen sections for a detailed term.
pub fn render_detailed_table(entry: &TermEntry) -> String {
    let mut out = String::new();
    if let TermEntry::Detailed(map) = entry {
        if map.is_empty() {
            return out;
        }
        let _ = writeln!(out, "| course | lecture | discussion |");
        let _ = writeln!(out, "|---|---|---|");
        for (course, choice) in map {
            let lecture = choice.lecture.as_ref().map(|s| s.id.0.as_str()).unwrap_or("—");
            let discussion = choice.discussion.as_ref().map(|s| s.id.0.as_str()).unwrap_or("—");
            let _ = writeln!(out, "| {course} | {lecture} | {discussion} |");
        }
    }
    out
}
