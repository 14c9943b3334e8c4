//! Planner: orders required courses term-by-term under requisite,
//! offering, and load constraints. Bounded search at the first term
//! (delegated to `search`); greedy topological scheduling thereafter,
//! with load targeting, a lexicographic tie-break for later terms, and a
//! final padding/trim pass against the configured per-term bounds.

pub mod search;

use crate::catalog::CatalogGateway;
use crate::error::{PlannerError, Result};
use crate::offering::OfferingIndex;
use crate::requisite::dnf::to_dnf_option;
use crate::requisite::engine::{build_dag, is_enforced, select_best_clause};
use crate::types::{Clause, Course, CourseKey, Grade, PlannerConfig, Schedule, SectionChoice, Term, TermEntry};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// A planner request: the scheduling window, the courses the student wants
/// scheduled, their transcript, and the active configuration.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub window: Vec<Term>,
    pub courses_to_schedule: Vec<CourseKey>,
    pub transcript: HashMap<CourseKey, Grade>,
    pub config: PlannerConfig,
}

/// The planner's best-effort result: the constructed schedule, plus any
/// required course that could not be placed anywhere in the window.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub schedule: Schedule,
    pub unplaceable: Vec<CourseKey>,
}

fn passed(transcript: &HashMap<CourseKey, Grade>, course: &CourseKey) -> bool {
    transcript
        .get(course)
        .map(|g| g.meets_minimum(Grade::DMinus))
        .unwrap_or(false)
}

/// Breadth-first expansion of the transitive closure of required
/// prerequisites, fetching each newly-discovered course's requisite tree
/// from the catalog one BFS layer at a time (a single batched call per
/// layer, rather than one call per course).
fn expand_requisites(
    gateway: &dyn CatalogGateway,
    initial: &[CourseKey],
    name_to_subject: &HashMap<String, String>,
    transcript: &HashMap<CourseKey, Grade>,
    allow_warnings: bool,
) -> Result<(Vec<CourseKey>, HashMap<CourseKey, Clause>)> {
    let mut required: Vec<CourseKey> = initial.to_vec();
    let mut seen: HashSet<CourseKey> = required.iter().cloned().collect();
    let mut frontier: Vec<CourseKey> = initial.to_vec();
    let mut chosen_clauses: HashMap<CourseKey, Clause> = HashMap::new();
    let mut course_cache: HashMap<CourseKey, Course> = HashMap::new();

    while !frontier.is_empty() {
        let to_fetch: Vec<CourseKey> = frontier
            .iter()
            .filter(|c| !course_cache.contains_key(c))
            .cloned()
            .collect();
        if !to_fetch.is_empty() {
            for course in gateway.lookup_courses(&to_fetch)? {
                course_cache.insert(course.key(), course);
            }
        }

        let mut next_frontier = Vec::new();
        for course_key in frontier.drain(..) {
            let tree = course_cache.get(&course_key).and_then(|c| c.requisites.clone());
            let raw_clauses = to_dnf_option(tree.as_ref());
            let selection = select_best_clause(&raw_clauses, name_to_subject, transcript);

            for leaf in &selection.missing {
                if is_enforced(leaf, allow_warnings) && seen.insert(leaf.course.clone()) {
                    required.push(leaf.course.clone());
                    next_frontier.push(leaf.course.clone());
                }
            }
            chosen_clauses.insert(course_key, selection.clause);
        }
        frontier = next_frontier;
    }

    Ok((required, chosen_clauses))
}

/// `base = floor(R/T)`, `extra = R mod T`; clamped into `[min, max]`.
fn target_load(remaining: usize, terms_remaining: usize, min_per_term: u32, max_per_term: u32) -> usize {
    if terms_remaining == 0 {
        return 0;
    }
    let base = remaining / terms_remaining;
    let extra = remaining % terms_remaining;
    let raw = base + usize::from(extra > 0);
    raw.clamp(min_per_term as usize, max_per_term as usize)
}

fn pad_and_trim(schedule: &mut Schedule, min_per_term: u32, max_per_term: u32) {
    for (_, entry) in schedule.0.iter_mut() {
        while entry.len() > max_per_term as usize {
            if !entry.remove_one_filler() {
                break;
            }
        }
        if entry.len() < min_per_term as usize {
            entry.pad_with_filler(min_per_term as usize);
        }
    }
}

/// Run the planner: expand requisites, restrict by offering, and place
/// courses term-by-term under load/requisite/offering constraints, with a
/// bounded section-aware search at the earliest term.
pub fn plan(gateway: &dyn CatalogGateway, request: &PlanRequest) -> Result<PlanOutcome> {
    if request.window.is_empty() {
        return Err(PlannerError::InputError("planning window is empty".to_string()).into());
    }

    let name_to_subject = crate::catalog::name_to_subject_map(&gateway.subjects()?);
    let prefs = &request.config.preferences;

    let initial_required: Vec<CourseKey> = request
        .courses_to_schedule
        .iter()
        .filter(|c| !passed(&request.transcript, c))
        .cloned()
        .collect();

    let (required, chosen_clauses) = expand_requisites(
        gateway,
        &initial_required,
        &name_to_subject,
        &request.transcript,
        prefs.allow_warnings,
    )?;

    let sections = gateway.sections_for(&required)?;
    let offering_index = OfferingIndex::build(&sections);
    let mut sections_by_course: HashMap<CourseKey, Vec<crate::types::Section>> = HashMap::new();
    for section in sections {
        sections_by_course.entry(section.course.clone()).or_default().push(section);
    }

    let (adjacency, mut indegree) = build_dag(&required, &chosen_clauses, prefs.allow_warnings);
    let mut remaining: HashSet<CourseKey> = required.into_iter().collect();

    let mut schedule = Schedule::new();
    let window_len = request.window.len();

    for (term_idx, term) in request.window.iter().enumerate() {
        if remaining.is_empty() {
            break;
        }
        let terms_remaining = window_len - term_idx;
        let target = target_load(remaining.len(), terms_remaining, prefs.min_per_term, prefs.max_per_term);

        let mut available: Vec<CourseKey> = remaining
            .iter()
            .filter(|c| *indegree.get(*c).unwrap_or(&0) == 0 && offering_index.is_offered(c, term))
            .cloned()
            .collect();
        available.sort();

        let placed: Vec<CourseKey> = if term_idx == 0 {
            let selection = search::select_first_term(&available, *term, target, &sections_by_course, &request.config);
            let mut detailed: IndexMap<String, SectionChoice> = IndexMap::new();
            let mut placed = Vec::new();
            for (course, choice) in selection.selections {
                detailed.insert(course.to_string(), choice);
                placed.push(course);
            }
            schedule.insert(*term, TermEntry::Detailed(detailed));
            placed
        } else {
            available.truncate(target);
            let list = available.iter().map(|c| c.to_string()).collect();
            schedule.insert(*term, TermEntry::List(list));
            available
        };

        for course in &placed {
            remaining.remove(course);
            if let Some(dependents) = adjacency.get(course) {
                for dependent in dependents {
                    if let Some(count) = indegree.get_mut(dependent) {
                        *count = count.saturating_sub(1);
                    }
                }
            }
        }
    }

    pad_and_trim(&mut schedule, prefs.min_per_term, prefs.max_per_term);

    let mut unplaceable: Vec<CourseKey> = remaining.into_iter().collect();
    unplaceable.sort();

    Ok(PlanOutcome { schedule, unplaceable })
}
