use super::Grade;
use serde::{Deserialize, Serialize};

/// Whether a requisite leaf must be satisfied before (`Prerequisite`) or
/// may be satisfied in the same term (`Corequisite`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Prerequisite,
    Corequisite,
}

/// `Required` leaves must always be honored; `Warning` leaves may be
/// ignored when the active `PlannerConfig` allows warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "R")]
    Required,
    #[serde(rename = "W")]
    Warning,
}

impl Severity {
    /// `true` when this leaf must be enforced given whether warnings are
    /// currently allowed to be skipped.
    pub fn is_enforced(&self, allow_warnings: bool) -> bool {
        match self {
            Severity::Required => true,
            Severity::Warning => !allow_warnings,
        }
    }
}

/// A recursive requisite tree: an internal node is an all-of (conjunction)
/// or any-of (disjunction) of children; a leaf names a required course in
/// human-readable `"<Department> <number>"` form, as it arrives from the
/// catalog, along with its relation, minimum grade, and severity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequisiteNode {
    And(Vec<RequisiteNode>),
    Or(Vec<RequisiteNode>),
    Leaf {
        /// Human-readable course reference, e.g. `"Computer Science 31"`.
        course: String,
        relation: Relation,
        #[serde(default = "default_min_grade")]
        min_grade: Grade,
        #[serde(default = "default_severity")]
        severity: Severity,
    },
}

fn default_min_grade() -> Grade {
    Grade::DMinus
}

fn default_severity() -> Severity {
    Severity::Required
}

/// One conjunction inside the disjunctive-normal-form expansion of a
/// requisite tree: a flat list of leaves that must all hold.
pub type Clause = Vec<RequisiteLeaf>;

/// A single parsed leaf, as used internally once the human-readable course
/// reference has been resolved against the catalog (see
/// `requisite::engine`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequisiteLeaf {
    pub course: super::CourseKey,
    pub relation: Relation,
    pub min_grade: Grade,
    pub severity: Severity,
}
