//! Plain-text schedule summaries for the `report` subcommand — colored
//! headers on a real terminal, written to stdout.

use crate::types::{Schedule, TermEntry};
use colored::Colorize;
use std::fmt::Write as _;

/// Render `schedule` as a term-by-term plain-text listing, one course key
/// per line, with the term label as a bold heading.
pub fn render(schedule: &Schedule) -> String {
    let mut out = String::new();
    for (term, entry) in schedule.entries() {
        let _ = writeln!(out, "{}", term.to_string().bold());
        for key in entry.course_keys() {
            let _ = writeln!(out, "  {key}");
        }
        if entry.is_empty() {
            let _ = writeln!(out, "  {}", "(empty)".dimmed());
        }
        let _ = writeln!(out);
    }
    out
}

/// Render the `note` line for the planner's unplaceable-course report, or
/// nothing if every course was placed.
pub fn render_note(note: Option<&str>) -> String {
    match note {
        Some(text) => format!("{} {}\n", "warning:".yellow().bold(), text),
        None => String::new(),
    }
}

/// Render a term's detailed section choices (the earliest term only),
/// naming the lecture/discussion section ids, or `"(none)"` when a half is
/// absent.
pub fn render_detailed(entry: &TermEntry) -> String {
    let mut out = String::new();
    if let TermEntry::Detailed(map) = entry {
        for (course, choice) in map {
            let lecture = choice.lecture.as_ref().map(|s| s.id.0.as_str()).unwrap_or("(none)");
            let discussion = choice.discussion.as_ref().map(|s| s.id.0.as_str()).unwrap_or("(none)");
            let _ = writeln!(out, "  {course}: lecture={lecture} discussion={discussion}");
        }
    }
    out
}
