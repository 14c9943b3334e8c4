mod config;
mod course;
mod grade;
mod preferences;
mod requisite;
mod schedule;
mod section;
mod subject;
mod term;

pub use config::*;
pub use course::*;
pub use grade::*;
pub use preferences::*;
pub use requisite::*;
pub use schedule::*;
pub use section::*;
pub use subject::*;
pub use term::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A course identified uniquely by `(subject_code, catalog_number)`,
/// rendered externally as `"<subject_code>|<catalog_number>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseKey {
    pub subject_code: String,
    pub catalog_number: String,
}

impl CourseKey {
    pub fn new(subject_code: impl Into<String>, catalog_number: impl Into<String>) -> Self {
        Self {
            subject_code: subject_code.into(),
            catalog_number: catalog_number.into(),
        }
    }

    /// `true` when the numeric portion of the catalog number lies in
    /// `[100, 199]`, ignoring leading/trailing letter prefixes and suffixes
    /// (e.g. `"M151B"` -> `151`, `"35L"` -> `35`).
    pub fn is_upper_division(&self) -> bool {
        match self.numeric_portion() {
            Some(n) => (100..=199).contains(&n),
            None => false,
        }
    }

    /// Extract the numeric portion of the catalog number, stripping any
    /// leading/trailing letters (e.g. `"M151B"` -> `151`).
    pub fn numeric_portion(&self) -> Option<u32> {
        let digits: String = self
            .catalog_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.subject_code, self.catalog_number)
    }
}

impl TryFrom<String> for CourseKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (subject_code, catalog_number) = value
            .split_once('|')
            .ok_or_else(|| format!("invalid course key '{value}': expected 'SUBJ|NUM'"))?;
        Ok(CourseKey::new(subject_code, catalog_number))
    }
}

impl From<CourseKey> for String {
    fn from(key: CourseKey) -> Self {
        key.to_string()
    }
}

impl From<&str> for CourseKey {
    fn from(value: &str) -> Self {
        CourseKey::try_from(value.to_string()).unwrap_or_else(|_| CourseKey::new(value, ""))
    }
}

/// Newtype for section identifiers, opaque beyond string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionId(pub String);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for subject identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub String);

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for instructor identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstructorId(pub String);

impl fmt::Display for InstructorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sentinel placeholder that pads under-loaded terms; transparent to every
/// invariant check.
pub const FILLER: &str = "FILLER";

/// `true` for the `FILLER` sentinel (including numbered repeats like
/// `"FILLER (2)"`, needed so a detailed term's map keys stay unique) or any
/// course key bearing the `Elective` suffix convention — both are
/// transparent to requisite and conflict validation.
pub fn is_placeholder(course_key: &str) -> bool {
    course_key.starts_with(FILLER) || course_key.ends_with("Elective")
}
