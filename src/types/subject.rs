use super::SubjectId;
use serde::{Deserialize, Serialize};

/// A department/subject area, e.g. `COM SCI` — Computer Science.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    /// Short code used in course keys, e.g. `"COM SCI"`.
    pub code: String,
    pub name: String,
}
