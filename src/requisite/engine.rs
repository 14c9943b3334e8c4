use super::dnf::{to_dnf_option, RawClause};
use crate::types::{Clause, CourseKey, Grade, Relation, RequisiteLeaf};
use std::collections::{HashMap, HashSet, VecDeque};

/// Resolve one human-readable course reference (`"Computer Science 31"`,
/// possibly with a trailing `)` left over from the source text) against a
/// department-name-to-subject-code mapping.
///
/// An unresolvable department name is treated as absent, surfacing as
/// `None` here; the caller skips the leaf.
pub fn resolve_course_ref(text: &str, name_to_subject: &HashMap<String, String>) -> Option<CourseKey> {
    let trimmed = text.trim().trim_end_matches(')');
    let (dept, num) = trimmed.rsplit_once(' ')?;
    let code = name_to_subject.get(&dept.trim().to_uppercase())?;
    Some(CourseKey::new(code.clone(), num.trim().to_uppercase()))
}

fn resolve_clause(clause: &RawClause, name_to_subject: &HashMap<String, String>) -> Clause {
    clause
        .iter()
        .filter_map(|leaf| {
            resolve_course_ref(&leaf.course, name_to_subject).map(|course| RequisiteLeaf {
                course,
                relation: leaf.relation,
                min_grade: leaf.min_grade,
                severity: leaf.severity,
            })
        })
        .collect()
}

/// `true` when a course was passed at or above `min_grade`.
fn meets_requirement(transcript: &HashMap<CourseKey, Grade>, course: &CourseKey, min_grade: Grade) -> bool {
    transcript
        .get(course)
        .map(|obtained| obtained.meets_minimum(min_grade))
        .unwrap_or(false)
}

/// The result of choosing among a course's DNF clauses: the chosen clause
/// itself, and the leaves within it still missing from the transcript.
#[derive(Debug, Clone)]
pub struct ClauseSelection {
    pub clause: Clause,
    pub missing: Clause,
}

/// Pick the DNF clause minimizing missing leaves, ties broken by clause
/// order; a clause with zero missing leaves is chosen immediately.
pub fn select_best_clause(
    raw_clauses: &[RawClause],
    name_to_subject: &HashMap<String, String>,
    transcript: &HashMap<CourseKey, Grade>,
) -> ClauseSelection {
    let mut best: Option<ClauseSelection> = None;
    for raw_clause in raw_clauses {
        let resolved = resolve_clause(raw_clause, name_to_subject);
        let missing: Clause = resolved
            .iter()
            .filter(|leaf| !meets_requirement(transcript, &leaf.course, leaf.min_grade))
            .cloned()
            .collect();
        if missing.is_empty() {
            return ClauseSelection {
                clause: resolved,
                missing,
            };
        }
        let is_better = best.as_ref().map(|b| missing.len() < b.missing.len()).unwrap_or(true);
        if is_better {
            best = Some(ClauseSelection {
                clause: resolved,
                missing,
            });
        }
    }
    best.unwrap_or(ClauseSelection {
        clause: vec![],
        missing: vec![],
    })
}

/// `true` when a requisite leaf must currently be honored: its relation is
/// (trivially, by construction) prerequisite or corequisite, and its
/// severity is required, or warning while warnings are disallowed.
pub fn is_enforced(leaf: &RequisiteLeaf, allow_warnings: bool) -> bool {
    matches!(leaf.relation, Relation::Prerequisite | Relation::Corequisite)
        && leaf.severity.is_enforced(allow_warnings)
}

/// Output of expanding the transitive closure of required prerequisites.
#[derive(Debug, Clone, Default)]
pub struct RequisiteResolution {
    /// The full required set (original request plus every transitively
    /// required course), in first-discovered order.
    pub required: Vec<CourseKey>,
    /// The chosen clause per course, keyed by course.
    pub chosen_clauses: HashMap<CourseKey, Clause>,
}

/// Breadth-first closure over the required set: for each course, pick its
/// best clause, and add every still-missing, currently-enforced leaf to the
/// required set (already-passed leaves are never added, since they can
/// never be "missing").
///
/// `course_requisites` is a catalog lookup from course key to its requisite
/// tree (`None` for a course with no tree on file, which is given the
/// empty clause).
pub fn expand_closure(
    initial_required: &[CourseKey],
    course_requisites: impl Fn(&CourseKey) -> Option<crate::types::RequisiteNode>,
    name_to_subject: &HashMap<String, String>,
    transcript: &HashMap<CourseKey, Grade>,
    allow_warnings: bool,
) -> RequisiteResolution {
    let mut required: Vec<CourseKey> = initial_required.to_vec();
    let mut seen: HashSet<CourseKey> = required.iter().cloned().collect();
    let mut queue: VecDeque<CourseKey> = required.iter().cloned().collect();
    let mut chosen_clauses = HashMap::new();

    while let Some(course) = queue.pop_front() {
        let tree = course_requisites(&course);
        let raw_clauses = to_dnf_option(tree.as_ref());
        let selection = select_best_clause(&raw_clauses, name_to_subject, transcript);

        for leaf in &selection.missing {
            if is_enforced(leaf, allow_warnings) && seen.insert(leaf.course.clone()) {
                required.push(leaf.course.clone());
                queue.push_back(leaf.course.clone());
            }
        }
        chosen_clauses.insert(course, selection.clause);
    }

    RequisiteResolution {
        required,
        chosen_clauses,
    }
}

/// The prerequisite DAG over `courses`, built from their chosen clauses and
/// restricted to enforceable edges (requisite -> dependent). Returns the
/// adjacency list and the initial indegree of every course in `courses`.
pub fn build_dag(
    courses: &[CourseKey],
    chosen_clauses: &HashMap<CourseKey, Clause>,
    allow_warnings: bool,
) -> (HashMap<CourseKey, Vec<CourseKey>>, HashMap<CourseKey, u32>) {
    let course_set: HashSet<&CourseKey> = courses.iter().collect();
    let mut adjacency: HashMap<CourseKey, Vec<CourseKey>> =
        courses.iter().cloned().map(|c| (c, Vec::new())).collect();
    let mut indegree: HashMap<CourseKey, u32> = courses.iter().cloned().map(|c| (c, 0)).collect();

    for course in courses {
        let Some(clause) = chosen_clauses.get(course) else {
            continue;
        };
        for leaf in clause {
            if course_set.contains(&leaf.course) && is_enforced(leaf, allow_warnings) {
                adjacency.entry(leaf.course.clone()).or_default().push(course.clone());
                *indegree.entry(course.clone()).or_insert(0) += 1;
            }
        }
    }
    (adjacency, indegree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RequisiteNode, Severity};

    fn subject_map() -> HashMap<String, String> {
        [
            ("COMPUTER SCIENCE".to_string(), "COM SCI".to_string()),
            ("MATHEMATICS".to_string(), "MATH".to_string()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn resolves_a_plain_department_and_number() {
        let map = subject_map();
        let key = resolve_course_ref("Computer Science 31", &map).unwrap();
        assert_eq!(key, CourseKey::new("COM SCI", "31"));
    }

    #[test]
    fn unresolvable_department_yields_none() {
        let map = subject_map();
        assert!(resolve_course_ref("Astrophysics 10", &map).is_none());
    }

    #[test]
    fn selects_the_clause_with_fewest_missing_leaves() {
        let map = subject_map();
        let mut transcript = HashMap::new();
        transcript.insert(CourseKey::new("COM SCI", "31"), Grade::A);

        let raw_clauses = vec![
            vec![super::super::dnf::RawLeaf {
                course: "Mathematics 31A".to_string(),
                relation: Relation::Prerequisite,
                min_grade: Grade::DMinus,
                severity: Severity::Required,
            }],
            vec![super::super::dnf::RawLeaf {
                course: "Computer Science 31".to_string(),
                relation: Relation::Prerequisite,
                min_grade: Grade::DMinus,
                severity: Severity::Required,
            }],
        ];

        let selection = select_best_clause(&raw_clauses, &map, &transcript);
        assert!(selection.missing.is_empty());
        assert_eq!(selection.clause[0].course, CourseKey::new("COM SCI", "31"));
    }

    #[test]
    fn expand_closure_adds_missing_prerequisites_transitively() {
        let map = subject_map();
        let cs32 = CourseKey::new("COM SCI", "32");
        let cs31 = CourseKey::new("COM SCI", "31");
        let cs31_tree = RequisiteNode::Leaf {
            course: "Computer Science 1".to_string(),
            relation: Relation::Prerequisite,
            min_grade: Grade::DMinus,
            severity: Severity::Required,
        };
        let cs32_tree = RequisiteNode::Leaf {
            course: "Computer Science 31".to_string(),
            relation: Relation::Prerequisite,
            min_grade: Grade::DMinus,
            severity: Severity::Required,
        };
        let name_to_subject = map.clone();
        let cs31_clone = cs31.clone();
        let resolution = expand_closure(
            &[cs32.clone()],
            move |course| {
                if *course == cs32 {
                    Some(cs32_tree.clone())
                } else if *course == cs31_clone {
                    Some(cs31_tree.clone())
                } else {
                    None
                }
            },
            &name_to_subject,
            &HashMap::new(),
            false,
        );

        assert!(resolution.required.contains(&cs31));
        assert!(resolution.required.contains(&CourseKey::new("COM SCI", "1")));
    }

    #[test]
    fn warning_leaves_are_not_enforced_when_warnings_are_allowed() {
        let leaf = RequisiteLeaf {
            course: CourseKey::new("COM SCI", "1"),
            relation: Relation::Prerequisite,
            min_grade: Grade::DMinus,
            severity: Severity::Warning,
        };
        assert!(!is_enforced(&leaf, true));
        assert!(is_enforced(&leaf, false));
    }
}
