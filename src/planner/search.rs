//! Bounded combinatorial search for the earliest term: enumerate size-`k`
//! subsets of the zero-indegree, offered courses, score each candidate
//! subset's section pairing, and keep the best one that survives the
//! active conflict policy.

use crate::selector::{score_and_select, validate_term_conflicts, PrefixSelection};
use crate::types::{CourseKey, PlannerConfig, Section, SectionChoice, Term};
use itertools::Itertools;
use std::collections::HashMap;

fn is_better(candidate: &PrefixSelection, current: &PrefixSelection) -> bool {
    (candidate.total_score, candidate.selections.len()) > (current.total_score, current.selections.len())
}

/// Choose the best-scoring surviving prefix of size `target` from
/// `available`, delegating section selection and scoring to the section
/// selector for each candidate. Falls back to the highest raw score prefix if every
/// enumerated combination violates the active conflict policy.
///
/// `available` is capped to `config.available_sample_threshold` candidates
/// (lexicographically smallest) before enumeration, and at most
/// `config.search_combination_cap` combinations are examined — the
/// combinatorial-explosion guard against pathological request sizes.
pub fn select_first_term(
    available: &[CourseKey],
    term: Term,
    target: usize,
    sections_by_course: &HashMap<CourseKey, Vec<Section>>,
    config: &PlannerConfig,
) -> PrefixSelection {
    if available.is_empty() || target == 0 {
        return PrefixSelection::default();
    }

    let mut sample = available.to_vec();
    sample.sort();
    sample.truncate(config.available_sample_threshold.max(target));

    let k = target.min(sample.len());
    let mut best_valid: Option<PrefixSelection> = None;
    let mut best_any: Option<PrefixSelection> = None;
    let mut examined = 0usize;

    for combo in sample.iter().cloned().combinations(k) {
        if examined >= config.search_combination_cap {
            break;
        }
        examined += 1;

        let selection = score_and_select(&combo, &term, sections_by_course, &config.preferences);
        let choices: Vec<&SectionChoice> = selection.selections.values().collect();
        let valid = validate_term_conflicts(&choices, &config.preferences);

        if best_any.as_ref().map(|b| is_better(&selection, b)).unwrap_or(true) {
            best_any = Some(selection.clone());
        }
        if valid && best_valid.as_ref().map(|b| is_better(&selection, b)).unwrap_or(true) {
            best_valid = Some(selection);
        }
    }

    best_valid.or(best_any).unwrap_or_default()
}
