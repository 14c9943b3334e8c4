//! Deserializing the planner/editor request documents read from standard
//! input, and validating them into the internal request types.

use crate::editor::Operation;
use crate::error::{PlannerError, Result};
use crate::planner::PlanRequest;
use crate::types::{CourseKey, Grade, PlannerConfig, Preferences, Season, Term, term_sequence};
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

fn parse_season(field: &str, value: &str) -> Result<Season> {
    Season::from_str(value).map_err(|e| PlannerError::InputError(format!("{field}: {e}")).into())
}

fn flatten_transcript(raw: HashMap<CourseKey, Option<Grade>>) -> HashMap<CourseKey, Grade> {
    raw.into_iter().filter_map(|(k, v)| v.map(|g| (k, g))).collect()
}

/// The planner's request document, as received on standard input.
#[derive(Debug, Deserialize)]
pub struct PlanInputDocument {
    pub start_year: i32,
    pub start_quarter: String,
    pub end_year: i32,
    pub end_quarter: String,
    pub courses_to_schedule: Vec<CourseKey>,
    #[serde(default)]
    pub transcript: HashMap<CourseKey, Option<Grade>>,
    pub preferences: Preferences,
}

impl PlanInputDocument {
    /// Validate and convert into a `PlanRequest`, rejecting an inverted
    /// planning window (end before start).
    pub fn into_request(self) -> Result<PlanRequest> {
        let start_season = parse_season("start_quarter", &self.start_quarter)?;
        let end_season = parse_season("end_quarter", &self.end_quarter)?;
        let start = Term::new(start_season, self.start_year);
        let end = Term::new(end_season, self.end_year);
        if end < start {
            return Err(PlannerError::InputError("planning window end precedes its start".to_string()).into());
        }
        let window = term_sequence(start, end);

        Ok(PlanRequest {
            window,
            courses_to_schedule: self.courses_to_schedule,
            transcript: flatten_transcript(self.transcript),
            config: PlannerConfig {
                preferences: self.preferences,
                ..PlannerConfig::default()
            },
        })
    }
}

/// One structured editor mutation as received on the wire. `Interpret`
/// parses successfully (it's a legal JSON shape) but is rejected when
/// converted to an `Operation` — the natural-language wrapper it represents
/// is out of this core's scope.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationDocument {
    Move {
        course_id: CourseKey,
        from_term: Term,
        to_term: Term,
    },
    Swap {
        course1_id: CourseKey,
        term1: Term,
        course2_id: CourseKey,
        term2: Term,
    },
    ChangeSection {
        course_id: CourseKey,
        term: Term,
        #[serde(default)]
        new_lecture_id: Option<String>,
        #[serde(default)]
        new_discussion_id: Option<String>,
    },
    Interpret {
        #[serde(default)]
        question: String,
    },
}

impl TryFrom<OperationDocument> for Operation {
    type Error = anyhow::Error;

    fn try_from(doc: OperationDocument) -> Result<Self> {
        match doc {
            OperationDocument::Move {
                course_id,
                from_term,
                to_term,
            } => Ok(Operation::Move {
                course: course_id,
                from_term,
                to_term,
            }),
            OperationDocument::Swap {
                course1_id,
                term1,
                course2_id,
                term2,
            } => Ok(Operation::Swap {
                course_a: course1_id,
                term_a: term1,
                course_b: course2_id,
                term_b: term2,
            }),
            OperationDocument::ChangeSection {
                course_id,
                term,
                new_lecture_id,
                new_discussion_id,
            } => Ok(Operation::ChangeSection {
                course: course_id,
                term,
                new_lecture_id,
                new_discussion_id,
            }),
            OperationDocument::Interpret { .. } => Err(PlannerError::OperationInvalid(
                "the interpret operation is an external natural-language wrapper, not part of this core".to_string(),
            )
            .into()),
        }
    }
}

/// The editor's request document.
#[derive(Debug, Deserialize)]
pub struct EditInputDocument {
    pub schedule: crate::types::Schedule,
    #[serde(default)]
    pub transcript: HashMap<CourseKey, Option<Grade>>,
    pub preferences: Preferences,
    pub operation: OperationDocument,
}

impl EditInputDocument {
    pub fn into_parts(self) -> Result<(crate::types::Schedule, HashMap<CourseKey, Grade>, PlannerConfig, Operation)> {
        let operation = Operation::try_from(self.operation)?;
        Ok((
            self.schedule,
            flatten_transcript(self.transcript),
            PlannerConfig {
                preferences: self.preferences,
                ..PlannerConfig::default()
            },
            operation,
        ))
    }
}

/// The tech-breadth optimizer's request document.
#[derive(Debug, Deserialize)]
pub struct TechBreadthInputDocument {
    pub transcript: HashMap<CourseKey, Option<Grade>>,
    #[serde(default)]
    pub required_courses: Vec<CourseKey>,
    pub tech_breadth_area: String,
    #[serde(default)]
    pub allow_warnings: bool,
}

impl TechBreadthInputDocument {
    pub fn into_request(self) -> crate::tech_breadth::TechBreadthRequest {
        crate::tech_breadth::TechBreadthRequest {
            breadth_area: self.tech_breadth_area,
            transcript: flatten_transcript(self.transcript),
            already_planned: self.required_courses.into_iter().collect(),
            allow_warnings: self.allow_warnings,
        }
    }
}
