pub mod dnf;
pub mod engine;

pub use dnf::{to_dnf, to_dnf_option, RawClause, RawLeaf};
pub use engine::{build_dag, expand_closure, is_enforced, resolve_course_ref, select_best_clause, ClauseSelection, RequisiteResolution};
