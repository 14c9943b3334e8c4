use crate::error::PlannerError;
use crate::types::{Course, Section, Subject};
use anyhow::Context;
use std::path::Path;

/// The full in-memory catalog, as loaded from a directory of JSON fixture
/// files — `subjects.json`, `courses.json`, `sections.json`.
#[derive(Debug, Clone, Default)]
pub struct CatalogData {
    pub subjects: Vec<Subject>,
    pub courses: Vec<Course>,
    pub sections: Vec<Section>,
}

fn read_json<T: serde::de::DeserializeOwned>(dir: &Path, file_name: &str) -> anyhow::Result<Vec<T>> {
    let path = dir.join(file_name);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(&path).map_err(|source| PlannerError::FileRead {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing fixture file '{}'", path.display()))
}

/// Load `subjects.json`, `courses.json`, and `sections.json` from `dir`.
/// A missing file yields an empty list rather than an error, so a minimal
/// fixture directory (e.g. courses-only) still loads.
pub fn load_fixtures(dir: &Path) -> anyhow::Result<CatalogData> {
    Ok(CatalogData {
        subjects: read_json(dir, "subjects.json")?,
        courses: read_json(dir, "courses.json")?,
        sections: read_json(dir, "sections.json")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fixture_directory_files_yield_empty_lists() {
        let dir = tempdir();
        let data = load_fixtures(&dir).unwrap();
        assert!(data.subjects.is_empty());
        assert!(data.courses.is_empty());
        assert!(data.sections.is_empty());
    }

    #[test]
    fn loads_courses_from_a_fixture_file() {
        let dir = tempdir();
        let mut file = std::fs::File::create(dir.join("courses.json")).unwrap();
        write!(
            file,
            r#"[{{"subject_code":"COM SCI","catalog_number":"31","title":"Intro","requisites":null,"breadth_areas":[]}}]"#
        )
        .unwrap();
        let data = load_fixtures(&dir).unwrap();
        assert_eq!(data.courses.len(), 1);
        assert_eq!(data.courses[0].subject_code, "COM SCI");
    }

    fn tempdir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "degree-planner-test-{}-{}",
            std::process::id(),
            dir_suffix()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn dir_suffix() -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        COUNTER.fetch_add(1, Ordering::SeqCst)
    }
}
