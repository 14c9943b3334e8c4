mod data;

pub use data::{load_fixtures, CatalogData};

use crate::error::{PlannerError, Result};
use crate::types::{Course, CourseKey, Section, Subject};
use std::collections::HashMap;
use std::thread;
use std::time::Duration;

/// Read-only query surface over the catalog store. Resolves subjects,
/// courses (with requisite tree), sections, meeting times, and instructors.
///
/// A trait so the in-memory fixture-backed implementation used by the CLI
/// and the property tests can stand in for a real network-backed one
/// without changing any downstream component.
pub trait CatalogGateway {
    /// Rows for every resolvable key; unresolved keys are silently omitted.
    fn lookup_courses(&self, keys: &[CourseKey]) -> Result<Vec<Course>>;

    /// All section rows in all terms for the given courses.
    fn sections_for(&self, keys: &[CourseKey]) -> Result<Vec<Section>>;

    /// The canonical subject table, used to resolve human-readable
    /// department names inside requisite leaves.
    fn subjects(&self) -> Result<Vec<Subject>>;

    /// Every course tagged under a breadth area, for the tech-breadth
    /// optimizer. Unlike `lookup_courses`, this is a discovery query: the
    /// caller doesn't already know the keys.
    fn courses_by_breadth_area(&self, area: &str) -> Result<Vec<Course>>;
}

/// Wrap a fallible fetch in up to `retries` attempts with a fixed backoff.
pub fn with_retries<T>(mut retries: u32, backoff: Duration, mut fetch: impl FnMut() -> Result<T>) -> Result<T> {
    let attempts = retries.max(1);
    loop {
        match fetch() {
            Ok(value) => return Ok(value),
            Err(_) if retries > 1 => {
                retries -= 1;
                thread::sleep(backoff);
            }
            Err(err) => {
                return Err(PlannerError::CatalogUnavailable {
                    attempts,
                    message: err.to_string(),
                }
                .into())
            }
        }
    }
}

/// Build the department-name -> subject-code mapping used to resolve
/// requisite leaves, stripping a trailing parenthetical off each subject's
/// long name (e.g. `"Computer Science (COM SCI)"` -> `"COMPUTER SCIENCE"`).
pub fn name_to_subject_map(subjects: &[Subject]) -> HashMap<String, String> {
    subjects
        .iter()
        .map(|s| {
            let name = match s.name.find('(') {
                Some(idx) => s.name[..idx].trim(),
                None => s.name.trim(),
            };
            (name.to_uppercase(), s.code.clone())
        })
        .collect()
}

/// A fixture-backed `CatalogGateway` holding the full catalog in memory,
/// indexed once at construction so repeated lookups are O(1), without a
/// mutable cache.
pub struct InMemoryCatalogGateway {
    courses_by_key: HashMap<CourseKey, Course>,
    sections_by_course: HashMap<CourseKey, Vec<Section>>,
    subjects: Vec<Subject>,
}

impl InMemoryCatalogGateway {
    pub fn new(data: CatalogData) -> Self {
        let mut sections_by_course: HashMap<CourseKey, Vec<Section>> = HashMap::new();
        for section in data.sections {
            sections_by_course.entry(section.course.clone()).or_default().push(section);
        }
        let courses_by_key = data.courses.into_iter().map(|c| (c.key(), c)).collect();
        Self {
            courses_by_key,
            sections_by_course,
            subjects: data.subjects,
        }
    }
}

impl CatalogGateway for InMemoryCatalogGateway {
    fn lookup_courses(&self, keys: &[CourseKey]) -> Result<Vec<Course>> {
        Ok(keys
            .iter()
            .filter_map(|k| self.courses_by_key.get(k).cloned())
            .collect())
    }

    fn sections_for(&self, keys: &[CourseKey]) -> Result<Vec<Section>> {
        Ok(keys
            .iter()
            .flat_map(|k| self.sections_by_course.get(k).cloned().unwrap_or_default())
            .collect())
    }

    fn subjects(&self) -> Result<Vec<Subject>> {
        Ok(self.subjects.clone())
    }

    fn courses_by_breadth_area(&self, area: &str) -> Result<Vec<Course>> {
        Ok(self
            .courses_by_key
            .values()
            .filter(|c| c.breadth_areas.iter().any(|a| a == area))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SubjectId;

    #[test]
    fn strips_trailing_parenthetical_from_subject_names() {
        let subjects = vec![Subject {
            id: SubjectId("1".to_string()),
            code: "COM SCI".to_string(),
            name: "Computer Science (COM SCI)".to_string(),
        }];
        let map = name_to_subject_map(&subjects);
        assert_eq!(map.get("COMPUTER SCIENCE"), Some(&"COM SCI".to_string()));
    }

    #[test]
    fn retries_until_success_then_returns() {
        use std::cell::Cell;
        let attempts = Cell::new(0);
        let result = with_retries(3, Duration::from_millis(0), || {
            attempts.set(attempts.get() + 1);
            if attempts.get() < 2 {
                Err(anyhow::anyhow!("transient"))
            } else {
                Ok(42)
            }
        });
        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.get(), 2);
    }

    #[test]
    fn exhausting_retries_surfaces_catalog_unavailable() {
        let result: Result<i32> = with_retries(2, Duration::from_millis(0), || Err(anyhow::anyhow!("down")));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("catalog unavailable"));
    }

    #[test]
    fn lookup_courses_omits_unresolved_keys() {
        let gateway = InMemoryCatalogGateway::new(CatalogData {
            subjects: vec![],
            courses: vec![],
            sections: vec![],
        });
        let found = gateway.lookup_courses(&[CourseKey::new("COM SCI", "31")]).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn courses_by_breadth_area_filters_by_tag() {
        let gateway = InMemoryCatalogGateway::new(CatalogData {
            subjects: vec![],
            courses: vec![
                crate::types::Course {
                    subject_code: "COM SCI".to_string(),
                    catalog_number: "111".to_string(),
                    title: "Operating Systems".to_string(),
                    requisites: None,
                    breadth_areas: vec!["Systems".to_string()],
                },
                crate::types::Course {
                    subject_code: "COM SCI".to_string(),
                    catalog_number: "31".to_string(),
                    title: "Intro".to_string(),
                    requisites: None,
                    breadth_areas: vec![],
                },
            ],
            sections: vec![],
        });
        let found = gateway.courses_by_breadth_area("Systems").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].catalog_number, "111");
    }
}
