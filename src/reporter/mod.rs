//! Human-readable schedule summaries for the `report` subcommand. Ambient
//! output surface, parallel to the JSON wire contract the planner/editor
//! speak on stdin/stdout.

pub mod markdown;
pub mod text;

use crate::types::Schedule;
use serde::Serialize;

/// The output formats the `report` subcommand supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Markdown,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unrecognized report format '{other}'")),
        }
    }
}

/// Render `schedule` in the requested format.
pub fn render(schedule: &Schedule, format: ReportFormat) -> crate::error::Result<String> {
    Ok(match format {
        ReportFormat::Text => text::render(schedule),
        ReportFormat::Markdown => markdown::render(schedule),
        ReportFormat::Json => serde_json::to_string_pretty(&JsonReport { schedule })?,
    })
}

#[derive(Serialize)]
struct JsonReport<'a> {
    schedule: &'a Schedule,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_format_strings_are_rejected() {
        assert!("yaml".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn markdown_alias_md_parses() {
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
    }
}
