use crate::types::{Grade, Relation, RequisiteNode, Severity};

/// A leaf as it appears directly inside a requisite tree, before its
/// human-readable course reference is resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLeaf {
    pub course: String,
    pub relation: Relation,
    pub min_grade: Grade,
    pub severity: Severity,
}

/// One conjunction inside a tree's disjunctive-normal-form expansion.
pub type RawClause = Vec<RawLeaf>;

/// Convert a requisite tree into a disjunction of conjunctions of leaves.
///
/// `And` distributes over its children's clause sets (Cartesian product,
/// concatenating leaves); `Or` concatenates its children's clause sets.
pub fn to_dnf(node: &RequisiteNode) -> Vec<RawClause> {
    match node {
        RequisiteNode::Leaf {
            course,
            relation,
            min_grade,
            severity,
        } => vec![vec![RawLeaf {
            course: course.clone(),
            relation: *relation,
            min_grade: *min_grade,
            severity: *severity,
        }]],
        RequisiteNode::And(children) => {
            let mut children = children.iter();
            let Some(first) = children.next() else {
                return vec![vec![]];
            };
            children.fold(to_dnf(first), |acc, child| {
                let child_clauses = to_dnf(child);
                acc.iter()
                    .flat_map(|a| {
                        child_clauses.iter().map(move |b| {
                            let mut combined = a.clone();
                            combined.extend(b.iter().cloned());
                            combined
                        })
                    })
                    .collect()
            })
        }
        RequisiteNode::Or(children) => children.iter().flat_map(to_dnf).collect(),
    }
}

/// A course with no requisite tree has the single, empty clause.
pub fn to_dnf_option(node: Option<&RequisiteNode>) -> Vec<RawClause> {
    match node {
        Some(node) => to_dnf(node),
        None => vec![vec![]],
    }
}
