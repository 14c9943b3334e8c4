//! Offering index: per-course mapping to the set of terms in which at
//! least one usable section exists. A pure function of already-fetched
//! section data.

use crate::types::{CourseKey, Section, Term};
use std::collections::{HashMap, HashSet};

/// Per-course set of terms with at least one usable section.
#[derive(Debug, Clone, Default)]
pub struct OfferingIndex(HashMap<CourseKey, HashSet<Term>>);

impl OfferingIndex {
    /// Build the index from every section of every course, retaining only
    /// usable sections (not simultaneously full in enrollment and waitlist).
    pub fn build(sections: &[Section]) -> Self {
        let mut index: HashMap<CourseKey, HashSet<Term>> = HashMap::new();
        for section in sections {
            if section.is_usable() {
                index.entry(section.course.clone()).or_default().insert(section.term);
            }
        }
        OfferingIndex(index)
    }

    /// `true` iff `course` has at least one usable section in `term`.
    pub fn is_offered(&self, course: &CourseKey, term: &Term) -> bool {
        self.0.get(course).map(|terms| terms.contains(term)).unwrap_or(false)
    }

    /// The set of terms a course is offered in, or an empty set if it is
    /// never offered (per any usable section) in the given catalog data.
    pub fn terms_for(&self, course: &CourseKey) -> HashSet<Term> {
        self.0.get(course).cloned().unwrap_or_default()
    }
}
