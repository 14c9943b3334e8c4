//! First-term section selector: scores candidate (lecture, discussion)
//! pairings against preferences and conflict policies, and selects the best
//! pairing per course in the first term.

use crate::types::{CourseKey, PreferenceAxis, Preferences, Schedule, Section, SectionChoice, Term};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Per-meeting-slot and per-section scoring against `prefs`. Every weight
/// contributed here is non-negative, so a section's score can never go
/// below zero.
pub fn score_section(section: &Section, prefs: &Preferences) -> i64 {
    let mut score = 0i64;
    for slot in &section.times {
        if slot.start >= prefs.earliest && slot.start <= prefs.latest {
            score += prefs.weight(PreferenceAxis::Time) as i64;
        }
        if slot.end >= prefs.earliest && slot.end <= prefs.latest {
            score += prefs.weight(PreferenceAxis::Time) as i64;
        }
        if prefs.preferred_buildings.iter().any(|b| b == &slot.building) {
            score += prefs.weight(PreferenceAxis::Building) as i64;
        }
        if slot.days.0.iter().all(|d| !prefs.forbidden_days.contains(d)) {
            score += prefs.weight(PreferenceAxis::Days) as i64;
        }
    }
    if section
        .instructors
        .iter()
        .any(|instr| prefs.preferred_instructors.contains(&instr.name) || prefs.preferred_instructors.contains(&instr.id))
    {
        score += prefs.weight(PreferenceAxis::Instructor) as i64;
    }
    score
}

/// The chosen section pair for one course, plus its contribution to the
/// prefix's total score.
#[derive(Debug, Clone)]
pub struct CourseSelection {
    pub choice: SectionChoice,
    pub score: i64,
}

/// Select the best primary section offered in `term`, and the best
/// secondary sharing the primary's code prefix. Returns `None` if no
/// primary is offered this term — the course is then omitted entirely, per
/// "the course is skipped (omitted from selection)".
pub fn select_for_course(term: &Term, sections: &[Section], prefs: &Preferences) -> Option<CourseSelection> {
    let offered_this_term: Vec<&Section> = sections.iter().filter(|s| s.term == *term).collect();

    let mut best_primary: Option<(&Section, i64)> = None;
    for section in offered_this_term.iter().filter(|s| s.is_primary) {
        let score = score_section(section, prefs);
        if best_primary.map(|(_, best)| score > best).unwrap_or(true) {
            best_primary = Some((section, score));
        }
    }
    let (primary, primary_score) = best_primary?;

    let mut best_secondary: Option<(&Section, i64)> = None;
    for section in offered_this_term
        .iter()
        .filter(|s| !s.is_primary && s.section.starts_with(primary.code_prefix()))
    {
        let score = score_section(section, prefs);
        if best_secondary.map(|(_, best)| score > best).unwrap_or(true) {
            best_secondary = Some((section, score));
        }
    }

    Some(CourseSelection {
        choice: SectionChoice {
            lecture: Some(primary.clone()),
            discussion: best_secondary.map(|(s, _)| s.clone()),
        },
        score: primary_score.max(0) + best_secondary.map(|(_, sc)| sc).unwrap_or(0).max(0),
    })
}

/// Selections for an entire prefix (candidate course subset), keyed in
/// the order the prefix's courses were iterated — this becomes the detailed
/// term's insertion order when a prefix is committed.
#[derive(Debug, Clone, Default)]
pub struct PrefixSelection {
    pub selections: IndexMap<CourseKey, SectionChoice>,
    pub total_score: i64,
}

/// Score and select sections for every course in `prefix`, summing scores
/// across the whole prefix.
pub fn score_and_select(
    prefix: &[CourseKey],
    term: &Term,
    sections_by_course: &HashMap<CourseKey, Vec<Section>>,
    prefs: &Preferences,
) -> PrefixSelection {
    let mut selections = IndexMap::new();
    let mut total_score = 0;
    for course in prefix {
        let Some(sections) = sections_by_course.get(course) else {
            continue;
        };
        if let Some(CourseSelection { choice, score }) = select_for_course(term, sections, prefs) {
            total_score += score;
            selections.insert(course.clone(), choice);
        }
    }
    PrefixSelection { selections, total_score }
}

/// `true` iff `choices` violates the active conflict policy: primaries
/// conflicting with each other when `allow_primary_conflicts` is false, or
/// any pairing involving a secondary (secondary-vs-secondary or
/// primary-vs-secondary across courses) conflicting when
/// `allow_secondary_conflicts` is false.
///
/// Takes a plain slice of section choices, independent of how the caller
/// keys them — a prefix under consideration keys by `CourseKey`, while a
/// committed `Schedule`'s detailed term keys by the raw course-key string.
pub fn violates_conflict_policy(
    choices: &[&SectionChoice],
    allow_primary_conflicts: bool,
    allow_secondary_conflicts: bool,
) -> bool {
    let primaries: Vec<&Section> = choices.iter().filter_map(|c| c.lecture.as_ref()).collect();
    let secondaries: Vec<&Section> = choices.iter().filter_map(|c| c.discussion.as_ref()).collect();

    if !allow_primary_conflicts && any_pair_conflicts(&primaries, &primaries, true) {
        return true;
    }
    if !allow_secondary_conflicts {
        if any_pair_conflicts(&secondaries, &secondaries, true) {
            return true;
        }
        if any_pair_conflicts(&primaries, &secondaries, false) {
            return true;
        }
    }
    false
}

fn any_pair_conflicts(a: &[&Section], b: &[&Section], skip_self_pairs: bool) -> bool {
    for (i, s1) in a.iter().enumerate() {
        for (j, s2) in b.iter().enumerate() {
            if skip_self_pairs && j <= i {
                continue;
            }
            if s1.times.iter().any(|m1| s2.times.iter().any(|m2| m1.conflicts_with(m2))) {
                return true;
            }
        }
    }
    false
}

/// Validate a detailed term's section choices against the active conflict
/// policy. Used both by the planner's first-term bounded search and by the
/// schedule editor's re-validation.
pub fn validate_term_conflicts(choices: &[&SectionChoice], prefs: &Preferences) -> bool {
    !violates_conflict_policy(choices, prefs.allow_primary_conflicts, prefs.allow_secondary_conflicts)
}

/// Convenience used by the editor: validate the detailed (earliest) term of
/// a schedule, if it has one, against the conflict policy.
pub fn validate_schedule_first_term(schedule: &Schedule, prefs: &Preferences) -> bool {
    let Some(first_term) = schedule.terms().next() else {
        return true;
    };
    match schedule.get(first_term) {
        Some(crate::types::TermEntry::Detailed(map)) => {
            let choices: Vec<&SectionChoice> = map.values().collect();
            validate_term_conflicts(&choices, prefs)
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClockTime, Day, DaySet, Instructor, MeetingSlot, Season, SectionId};

    fn slot(days: &[Day], start_h: u16, start_m: u16, end_h: u16, end_m: u16) -> MeetingSlot {
        MeetingSlot {
            days: DaySet::new(days.iter().copied()),
            start: ClockTime::new(start_h, start_m),
            end: ClockTime::new(end_h, end_m),
            building: "MS".to_string(),
            room: "1".to_string(),
        }
    }

    fn section(id: &str, term: Term, is_primary: bool, code: &str, times: Vec<MeetingSlot>) -> Section {
        Section {
            id: SectionId(id.to_string()),
            course: CourseKey::new("COM SCI", "31"),
            term,
            section: code.to_string(),
            is_primary,
            activity: if is_primary { "Lec".into() } else { "Dis".into() },
            enrollment_cap: 100,
            enrollment_total: 0,
            waitlist_cap: 10,
            waitlist_total: 0,
            times,
            instructors: vec![],
        }
    }

    #[test]
    fn prefers_the_non_friday_lecture_matching_the_time_window() {
        let term = Term::new(Season::Fall, 2024);
        let mwf = section(
            "mwf",
            term,
            true,
            "1",
            vec![slot(&[Day::Monday, Day::Wednesday, Day::Friday], 9, 0, 9, 50)],
        );
        let tr = section("tr", term, true, "2", vec![slot(&[Day::Tuesday, Day::Thursday], 11, 0, 12, 15)]);
        let prefs = Preferences {
            earliest: ClockTime::new(9, 0),
            latest: ClockTime::new(10, 0),
            forbidden_days: vec![Day::Friday],
            priority: vec![
                PreferenceAxis::Time,
                PreferenceAxis::Days,
                PreferenceAxis::Building,
                PreferenceAxis::Instructor,
            ],
            ..Preferences::default()
        };
        let selection = select_for_course(&term, &[mwf, tr], &prefs).unwrap();
        assert_eq!(selection.choice.lecture.unwrap().id, SectionId("tr".to_string()));
    }

    #[test]
    fn course_with_no_primary_in_term_is_omitted() {
        let term = Term::new(Season::Fall, 2024);
        let other_term = Term::new(Season::Winter, 2025);
        let only_other_term = section("x", other_term, true, "1", vec![]);
        let prefs = Preferences::default();
        assert!(select_for_course(&term, &[only_other_term], &prefs).is_none());
    }

    #[test]
    fn secondary_must_share_the_primarys_code_prefix() {
        let term = Term::new(Season::Fall, 2024);
        let primary = section("lec", term, true, "1", vec![]);
        let matching_disc = section("disc-match", term, false, "1A", vec![]);
        let mismatched_disc = section("disc-mismatch", term, false, "2A", vec![]);
        let prefs = Preferences::default();
        let selection = select_for_course(&term, &[primary, matching_disc, mismatched_disc], &prefs).unwrap();
        assert_eq!(
            selection.choice.discussion.unwrap().id,
            SectionId("disc-match".to_string())
        );
    }

    #[test]
    fn overlapping_primaries_violate_policy_only_when_disallowed() {
        let term = Term::new(Season::Fall, 2024);
        let mut selections = IndexMap::new();
        selections.insert(
            CourseKey::new("COM SCI", "31"),
            SectionChoice::lecture_only(section(
                "a",
                term,
                true,
                "1",
                vec![slot(&[Day::Monday], 9, 0, 9, 50)],
            )),
        );
        selections.insert(
            CourseKey::new("MATH", "31A"),
            SectionChoice::lecture_only(section(
                "b",
                term,
                true,
                "1",
                vec![slot(&[Day::Monday], 9, 30, 10, 20)],
            )),
        );
        let choices: Vec<&SectionChoice> = selections.values().collect();
        assert!(violates_conflict_policy(&choices, false, true));
        assert!(!violates_conflict_policy(&choices, true, true));
    }
}
