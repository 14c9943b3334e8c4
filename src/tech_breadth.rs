//! Tech-breadth optimizer: ranks elective candidates under a breadth area
//! by how few additional prerequisites they'd require.

use crate::catalog::CatalogGateway;
use crate::error::{PlannerError, Result};
use crate::requisite::dnf::to_dnf_option;
use crate::requisite::engine::resolve_course_ref;
use crate::types::{CourseKey, Grade};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A ranking request: the declared breadth area, the student's transcript,
/// and the courses already committed to a schedule (planned but possibly
/// not yet passed).
#[derive(Debug, Clone)]
pub struct TechBreadthRequest {
    pub breadth_area: String,
    pub transcript: HashMap<CourseKey, Grade>,
    pub already_planned: HashSet<CourseKey>,
    pub allow_warnings: bool,
}

/// One ranked candidate: its key, title, and the minimum number of
/// not-yet-satisfied prerequisite leaves across its requisite tree's DNF
/// clauses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCourse {
    pub course: CourseKey,
    pub title: String,
    pub missing: usize,
}

fn passed_or_planned(transcript: &HashMap<CourseKey, Grade>, planned: &HashSet<CourseKey>, course: &CourseKey) -> bool {
    planned.contains(course) || transcript.get(course).map(|g| g.meets_minimum(Grade::DMinus)).unwrap_or(false)
}

/// Minimum, over the course's DNF clauses, of the count of enforced leaves
/// whose course is neither completed nor already planned. A leaf whose
/// department name can't be resolved is treated the same as
/// `requisite::engine`'s closure expansion: skipped, never counted missing.
fn missing_count(
    course: &crate::types::Course,
    name_to_subject: &HashMap<String, String>,
    transcript: &HashMap<CourseKey, Grade>,
    planned: &HashSet<CourseKey>,
    allow_warnings: bool,
) -> usize {
    let raw_clauses = to_dnf_option(course.requisites.as_ref());
    raw_clauses
        .iter()
        .map(|clause| {
            clause
                .iter()
                .filter(|leaf| {
                    let severity_gate = matches!(leaf.severity, crate::types::Severity::Required) || !allow_warnings;
                    let enforced = severity_gate
                        && matches!(leaf.relation, crate::types::Relation::Prerequisite | crate::types::Relation::Corequisite);
                    enforced
                        && resolve_course_ref(&leaf.course, name_to_subject)
                            .map(|key| !passed_or_planned(transcript, planned, &key))
                            .unwrap_or(false)
                })
                .count()
        })
        .min()
        .unwrap_or(0)
}

/// Rank every course tagged under `request.breadth_area`, restricted to
/// upper-division courses not already completed or planned, ascending by
/// `missing`. Fails if fewer than 3 candidates remain after filtering.
pub fn rank_tech_breadth(gateway: &dyn CatalogGateway, request: &TechBreadthRequest) -> Result<Vec<RankedCourse>> {
    let name_to_subject = crate::catalog::name_to_subject_map(&gateway.subjects()?);
    let candidates = gateway.courses_by_breadth_area(&request.breadth_area)?;

    let mut ranked: Vec<RankedCourse> = candidates
        .into_iter()
        .filter(|c| c.is_upper_division())
        .filter(|c| !passed_or_planned(&request.transcript, &request.already_planned, &c.key()))
        .map(|course| RankedCourse {
            missing: missing_count(
                &course,
                &name_to_subject,
                &request.transcript,
                &request.already_planned,
                request.allow_warnings,
            ),
            course: course.key(),
            title: course.title,
        })
        .collect();

    if ranked.len() < 3 {
        return Err(PlannerError::InputError(format!(
            "tech-breadth area '{}' yields only {} eligible candidate(s), need at least 3",
            request.breadth_area,
            ranked.len()
        ))
        .into());
    }

    ranked.sort_by(|a, b| a.missing.cmp(&b.missing).then_with(|| a.course.cmp(&b.course)));
    Ok(ranked)
}
