use super::{CourseKey, RequisiteNode};
use serde::{Deserialize, Serialize};

/// A course offering: identified by `(subject_code, catalog_number)`,
/// carrying a title and an optional requisite tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub subject_code: String,
    pub catalog_number: String,
    pub title: String,
    #[serde(default)]
    pub requisites: Option<RequisiteNode>,
    /// Breadth-area tags this course is indexed under, consumed by the
    /// tech-breadth optimizer.
    #[serde(default)]
    pub breadth_areas: Vec<String>,
}

impl Course {
    pub fn key(&self) -> CourseKey {
        CourseKey::new(self.subject_code.clone(), self.catalog_number.clone())
    }

    pub fn is_upper_division(&self) -> bool {
        self.key().is_upper_division()
    }
}
