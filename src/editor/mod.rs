//! Schedule editor: applies move/swap/change-section mutations to a
//! previously-planned schedule, re-validating every constraint the planner
//! established before committing, atomically staging mutations on a copy
//! and committing only on success.

use crate::catalog::CatalogGateway;
use crate::requisite::dnf::to_dnf_option;
use crate::requisite::engine::{is_enforced, select_best_clause};
use crate::selector::validate_schedule_first_term;
use crate::types::{CourseKey, Grade, PlannerConfig, Relation, Schedule, Term, is_placeholder};
use std::collections::HashMap;

/// One of the three structured mutations the core supports. The `interpret`
/// operation named in the wire contract is an LLM-driven wrapper around
/// these three and is rejected at the parsing boundary, never reaching here.
#[derive(Debug, Clone)]
pub enum Operation {
    Move {
        course: CourseKey,
        from_term: Term,
        to_term: Term,
    },
    Swap {
        course_a: CourseKey,
        term_a: Term,
        course_b: CourseKey,
        term_b: Term,
    },
    ChangeSection {
        course: CourseKey,
        term: Term,
        new_lecture_id: Option<String>,
        new_discussion_id: Option<String>,
    },
}

/// Outcome of an edit attempt: either a success with the mutated schedule,
/// or a failure carrying a message and no schedule (the caller's schedule is
/// left untouched either way).
#[derive(Debug, Clone)]
pub struct EditResult {
    pub success: bool,
    pub message: String,
    pub schedule: Option<Schedule>,
}

impl EditResult {
    fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            schedule: None,
        }
    }
}

fn apply_move(schedule: &mut Schedule, course: &CourseKey, from_term: Term, to_term: Term) -> Result<(), String> {
    if schedule.get(&from_term).is_none() {
        return Err(format!("invalid-term: {from_term} is not part of this schedule"));
    }
    if schedule.get(&to_term).is_none() {
        return Err(format!("invalid-term: {to_term} is not part of this schedule"));
    }
    let key = course.to_string();
    let choice = schedule
        .get(&from_term)
        .and_then(|e| e.section_choice(&key))
        .cloned()
        .unwrap_or_default();

    if !schedule.get_mut(&from_term).unwrap().remove(&key) {
        return Err(format!("course-missing-in-term: {course} is not scheduled in {from_term}"));
    }
    schedule.get_mut(&to_term).unwrap().insert(key, choice);
    Ok(())
}

fn apply_swap(
    schedule: &mut Schedule,
    course_a: &CourseKey,
    term_a: Term,
    course_b: &CourseKey,
    term_b: Term,
) -> Result<(), String> {
    if schedule.get(&term_a).is_none() {
        return Err(format!("invalid-term: {term_a} is not part of this schedule"));
    }
    if schedule.get(&term_b).is_none() {
        return Err(format!("invalid-term: {term_b} is not part of this schedule"));
    }
    let key_a = course_a.to_string();
    let key_b = course_b.to_string();
    let choice_a = schedule.get(&term_a).and_then(|e| e.section_choice(&key_a)).cloned().unwrap_or_default();
    let choice_b = schedule.get(&term_b).and_then(|e| e.section_choice(&key_b)).cloned().unwrap_or_default();

    if !schedule.get_mut(&term_a).unwrap().remove(&key_a) {
        return Err(format!("course-missing-in-term: {course_a} is not scheduled in {term_a}"));
    }
    if !schedule.get_mut(&term_b).unwrap().remove(&key_b) {
        return Err(format!("course-missing-in-term: {course_b} is not scheduled in {term_b}"));
    }
    schedule.get_mut(&term_a).unwrap().insert(key_b, choice_b);
    schedule.get_mut(&term_b).unwrap().insert(key_a, choice_a);
    Ok(())
}

fn apply_change_section(
    gateway: &dyn CatalogGateway,
    schedule: &mut Schedule,
    course: &CourseKey,
    term: Term,
    new_lecture_id: Option<&str>,
    new_discussion_id: Option<&str>,
) -> Result<(), String> {
    if schedule.terms().next() != Some(&term) {
        return Err("operation-on-non-earliest-term-for-section-change: change_section is only valid in the earliest term".to_string());
    }
    let key = course.to_string();
    let mut choice = schedule
        .get(&term)
        .and_then(|e| e.section_choice(&key))
        .cloned()
        .ok_or_else(|| format!("course-missing-in-term: {course} is not scheduled in {term}"))?;

    let sections = gateway.sections_for(&[course.clone()]).map_err(|e| e.to_string())?;

    if let Some(id) = new_lecture_id {
        let section = sections
            .iter()
            .find(|s| s.is_primary && s.id.0 == id)
            .cloned()
            .ok_or_else(|| format!("section-not-found: no primary section '{id}' for {course}"))?;
        choice.lecture = Some(section);
    }
    if let Some(id) = new_discussion_id {
        let section = sections
            .iter()
            .find(|s| !s.is_primary && s.id.0 == id)
            .cloned()
            .ok_or_else(|| format!("section-not-found: no secondary section '{id}' for {course}"))?;
        choice.discussion = Some(section);
    }

    schedule.get_mut(&term).unwrap().insert(key, choice);
    Ok(())
}

/// Full-schedule requisite re-validation: each placed course's chosen
/// clause (resolved the same way the planner resolves it, purely from the
/// transcript) must have every enforced leaf either passed or placed
/// strictly earlier (prerequisite) or no later (corequisite).
fn validate_requisites(
    schedule: &Schedule,
    gateway: &dyn CatalogGateway,
    name_to_subject: &HashMap<String, String>,
    transcript: &HashMap<CourseKey, Grade>,
    allow_warnings: bool,
) -> crate::error::Result<Option<String>> {
    let planned = schedule.planned_courses();

    let mut term_of: HashMap<CourseKey, Term> = HashMap::new();
    for (term, key) in &planned {
        let course_key = CourseKey::from(key.as_str());
        if term_of.insert(course_key.clone(), *term).is_some() {
            return Ok(Some(format!("requisite-unmet: {course_key} is scheduled more than once")));
        }
    }

    let keys: Vec<CourseKey> = term_of.keys().cloned().collect();
    let courses = gateway.lookup_courses(&keys)?;
    let course_by_key: HashMap<CourseKey, crate::types::Course> = courses.into_iter().map(|c| (c.key(), c)).collect();

    for (course_key, term) in &term_of {
        let Some(course) = course_by_key.get(course_key) else {
            continue;
        };
        let raw_clauses = to_dnf_option(course.requisites.as_ref());
        let selection = select_best_clause(&raw_clauses, name_to_subject, transcript);

        for leaf in &selection.clause {
            if !is_enforced(leaf, allow_warnings) {
                continue;
            }
            if transcript.get(&leaf.course).map(|g| g.meets_minimum(Grade::DMinus)).unwrap_or(false) {
                continue;
            }
            if is_placeholder(&leaf.course.to_string()) {
                continue;
            }
            let satisfied = match term_of.get(&leaf.course) {
                Some(other_term) => match leaf.relation {
                    Relation::Prerequisite => other_term < term,
                    Relation::Corequisite => other_term <= term,
                },
                None => false,
            };
            if !satisfied {
                return Ok(Some(format!(
                    "requisite-unmet: {course_key} in {term} requires {} (relation {:?})",
                    leaf.course, leaf.relation
                )));
            }
        }
    }
    Ok(None)
}

/// Apply `operation` to a copy of `schedule`, re-validating requisite
/// ordering (and section conflicts when the earliest term is touched)
/// before ever returning a mutated schedule. On any failure the returned
/// `schedule` is `None` — the caller's original is left untouched.
pub fn apply(
    gateway: &dyn CatalogGateway,
    schedule: &Schedule,
    transcript: &HashMap<CourseKey, Grade>,
    config: &PlannerConfig,
    operation: &Operation,
) -> crate::error::Result<EditResult> {
    let name_to_subject = crate::catalog::name_to_subject_map(&gateway.subjects()?);
    let mut tentative = schedule.clone();

    let mutation = match operation {
        Operation::Move {
            course,
            from_term,
            to_term,
        } => apply_move(&mut tentative, course, *from_term, *to_term),
        Operation::Swap {
            course_a,
            term_a,
            course_b,
            term_b,
        } => apply_swap(&mut tentative, course_a, *term_a, course_b, *term_b),
        Operation::ChangeSection {
            course,
            term,
            new_lecture_id,
            new_discussion_id,
        } => apply_change_section(
            gateway,
            &mut tentative,
            course,
            *term,
            new_lecture_id.as_deref(),
            new_discussion_id.as_deref(),
        ),
    };

    if let Err(message) = mutation {
        return Ok(EditResult::rejected(message));
    }

    if let Some(message) = validate_requisites(
        &tentative,
        gateway,
        &name_to_subject,
        transcript,
        config.preferences.allow_warnings,
    )? {
        return Ok(EditResult::rejected(message));
    }

    if !validate_schedule_first_term(&tentative, &config.preferences) {
        return Ok(EditResult::rejected("time-conflict: earliest term has an overlapping section pair".to_string()));
    }

    Ok(EditResult {
        success: true,
        message: "ok".to_string(),
        schedule: Some(tentative),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogData, InMemoryCatalogGateway};
    use crate::types::{Course, Relation, RequisiteNode, Season, Severity, Subject, SubjectId, TermEntry};

    fn subjects() -> Vec<Subject> {
        vec![Subject {
            id: SubjectId("1".into()),
            code: "COM SCI".into(),
            name: "Computer Science".into(),
        }]
    }

    fn schedule_with(fall: Term, winter: Term) -> Schedule {
        let mut schedule = Schedule::new();
        schedule.insert(fall, TermEntry::List(vec!["COM SCI|31".to_string()]));
        schedule.insert(winter, TermEntry::List(vec!["COM SCI|32".to_string()]));
        schedule
    }

    fn gateway_with_prereq() -> InMemoryCatalogGateway {
        InMemoryCatalogGateway::new(CatalogData {
            subjects: subjects(),
            courses: vec![
                Course {
                    subject_code: "COM SCI".into(),
                    catalog_number: "31".into(),
                    title: "Intro".into(),
                    requisites: None,
                    breadth_areas: vec![],
                },
                Course {
                    subject_code: "COM SCI".into(),
                    catalog_number: "32".into(),
                    title: "Intro II".into(),
                    requisites: Some(RequisiteNode::Leaf {
                        course: "Computer Science 31".into(),
                        relation: Relation::Prerequisite,
                        min_grade: Grade::DMinus,
                        severity: Severity::Required,
                    }),
                    breadth_areas: vec![],
                },
            ],
            sections: vec![],
        })
    }

    #[test]
    fn swap_that_breaks_a_prerequisite_is_rejected_and_leaves_schedule_untouched() {
        let fall = Term::new(Season::Fall, 2024);
        let winter = Term::new(Season::Winter, 2025);
        let schedule = schedule_with(fall, winter);
        let gateway = gateway_with_prereq();

        let op = Operation::Swap {
            course_a: CourseKey::from("COM SCI|31"),
            term_a: fall,
            course_b: CourseKey::from("COM SCI|32"),
            term_b: winter,
        };
        let result = apply(&gateway, &schedule, &HashMap::new(), &PlannerConfig::default(), &op).unwrap();
        assert!(!result.success);
        assert!(result.message.contains("requisite-unmet"));
        assert!(result.schedule.is_none());
    }

    #[test]
    fn move_that_keeps_prerequisite_ordering_succeeds() {
        let fall = Term::new(Season::Fall, 2024);
        let winter = Term::new(Season::Winter, 2025);
        let spring = Term::new(Season::Spring, 2025);
        let mut schedule = schedule_with(fall, winter);
        schedule.insert(spring, TermEntry::List(vec![]));
        let gateway = gateway_with_prereq();

        let op = Operation::Move {
            course: CourseKey::from("COM SCI|32"),
            from_term: winter,
            to_term: spring,
        };
        let result = apply(&gateway, &schedule, &HashMap::new(), &PlannerConfig::default(), &op).unwrap();
        assert!(result.success);
        let updated = result.schedule.unwrap();
        assert!(updated.get(&spring).unwrap().contains("COM SCI|32"));
        assert!(!updated.get(&winter).unwrap().contains("COM SCI|32"));
    }

    #[test]
    fn moving_from_a_term_the_course_is_not_in_fails_with_course_missing() {
        let fall = Term::new(Season::Fall, 2024);
        let winter = Term::new(Season::Winter, 2025);
        let schedule = schedule_with(fall, winter);
        let gateway = gateway_with_prereq();

        let op = Operation::Move {
            course: CourseKey::from("COM SCI|99"),
            from_term: fall,
            to_term: winter,
        };
        let result = apply(&gateway, &schedule, &HashMap::new(), &PlannerConfig::default(), &op).unwrap();
        assert!(!result.success);
        assert!(result.message.contains("course-missing-in-term"));
    }

    #[test]
    fn move_to_an_unknown_term_fails_with_invalid_term() {
        let fall = Term::new(Season::Fall, 2024);
        let winter = Term::new(Season::Winter, 2025);
        let far_future = Term::new(Season::Fall, 2030);
        let schedule = schedule_with(fall, winter);
        let gateway = gateway_with_prereq();

        let op = Operation::Move {
            course: CourseKey::from("COM SCI|31"),
            from_term: fall,
            to_term: far_future,
        };
        let result = apply(&gateway, &schedule, &HashMap::new(), &PlannerConfig::default(), &op).unwrap();
        assert!(!result.success);
        assert!(result.message.contains("invalid-term"));
    }

    #[test]
    fn change_section_outside_the_earliest_term_is_rejected() {
        let fall = Term::new(Season::Fall, 2024);
        let winter = Term::new(Season::Winter, 2025);
        let schedule = schedule_with(fall, winter);
        let gateway = gateway_with_prereq();

        let op = Operation::ChangeSection {
            course: CourseKey::from("COM SCI|32"),
            term: winter,
            new_lecture_id: Some("x".to_string()),
            new_discussion_id: None,
        };
        let result = apply(&gateway, &schedule, &HashMap::new(), &PlannerConfig::default(), &op).unwrap();
        assert!(!result.success);
        assert!(result.message.contains("operation-on-non-earliest-term-for-section-change"));
    }
}
