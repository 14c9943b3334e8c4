use super::{Section, Term};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The chosen primary/secondary sections for one course in a detailed term,
/// either half left `None` when no usable section of that kind exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionChoice {
    #[serde(default)]
    pub lecture: Option<Section>,
    #[serde(default)]
    pub discussion: Option<Section>,
}

impl SectionChoice {
    pub fn lecture_only(section: Section) -> Self {
        Self {
            lecture: Some(section),
            discussion: None,
        }
    }
}

/// One term's worth of planned courses.
///
/// The earliest term is `Detailed`, carrying the chosen section pair per
/// course key in the order they were assigned; every later term is a plain
/// `List` of course keys (including the `FILLER`/`*Elective` placeholder
/// tokens used to pad under-filled terms).
#[derive(Debug, Clone, PartialEq)]
pub enum TermEntry {
    Detailed(IndexMap<String, SectionChoice>),
    List(Vec<String>),
}

impl TermEntry {
    /// The course keys named in this term, in assignment order, regardless
    /// of which variant this is.
    pub fn course_keys(&self) -> Vec<&str> {
        match self {
            TermEntry::Detailed(map) => map.keys().map(String::as_str).collect(),
            TermEntry::List(list) => list.iter().map(String::as_str).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TermEntry::Detailed(map) => map.len(),
            TermEntry::List(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove a course key, returning whether it was present.
    pub fn remove(&mut self, course_key: &str) -> bool {
        match self {
            TermEntry::Detailed(map) => map.shift_remove(course_key).is_some(),
            TermEntry::List(list) => {
                if let Some(pos) = list.iter().position(|c| c == course_key) {
                    list.remove(pos);
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn contains(&self, course_key: &str) -> bool {
        match self {
            TermEntry::Detailed(map) => map.contains_key(course_key),
            TermEntry::List(list) => list.iter().any(|c| c == course_key),
        }
    }

    /// Insert a course key, carrying a section choice through if this is a
    /// detailed term (ignored for a plain list term).
    pub fn insert(&mut self, course_key: String, choice: SectionChoice) {
        match self {
            TermEntry::Detailed(map) => {
                map.insert(course_key, choice);
            }
            TermEntry::List(list) => {
                if !list.contains(&course_key) {
                    list.push(course_key);
                }
            }
        }
    }

    pub fn section_choice(&self, course_key: &str) -> Option<&SectionChoice> {
        match self {
            TermEntry::Detailed(map) => map.get(course_key),
            TermEntry::List(_) => None,
        }
    }

    /// Pad this term with `FILLER` tokens (numbered past the first, since a
    /// detailed term's map keys must stay unique) until it reaches
    /// `target_len`. A no-op if already at or past that length.
    pub fn pad_with_filler(&mut self, target_len: usize) {
        let mut n = 1u32;
        while self.len() < target_len {
            let key = if n == 1 {
                super::FILLER.to_string()
            } else {
                format!("{} ({n})", super::FILLER)
            };
            match self {
                TermEntry::Detailed(map) => {
                    map.insert(key, SectionChoice::default());
                }
                TermEntry::List(list) => list.push(key),
            }
            n += 1;
        }
    }

    /// Remove one `FILLER` entry (in whatever order it's found), reporting
    /// whether one existed to remove — used to trim an over-padded term.
    pub fn remove_one_filler(&mut self) -> bool {
        let victim = self
            .course_keys()
            .into_iter()
            .find(|c| super::is_placeholder(c))
            .map(|c| c.to_string());
        match victim {
            Some(key) => self.remove(&key),
            None => false,
        }
    }
}

impl Serialize for TermEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            TermEntry::Detailed(map) => map.serialize(serializer),
            TermEntry::List(list) => list.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TermEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Detailed(IndexMap<String, SectionChoice>),
            List(Vec<String>),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Detailed(map) => TermEntry::Detailed(map),
            Raw::List(list) => TermEntry::List(list),
        })
    }
}

/// The full planned course sequence, term by term, in chronological order.
///
/// Serializes as a JSON object keyed by term label (`"Fall 2024"`), with
/// keys written in the order they're stored here — the planner always
/// builds that in chronological order, and the editor only ever mutates a
/// term's contents, never the term ordering itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule(pub IndexMap<Term, TermEntry>);

impl Schedule {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn get(&self, term: &Term) -> Option<&TermEntry> {
        self.0.get(term)
    }

    pub fn get_mut(&mut self, term: &Term) -> Option<&mut TermEntry> {
        self.0.get_mut(term)
    }

    pub fn insert(&mut self, term: Term, entry: TermEntry) {
        self.0.insert(term, entry);
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.0.keys()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Term, &TermEntry)> {
        self.0.iter()
    }

    /// Position of `term` in the chronological sequence, used to tell
    /// whether one term precedes another within this schedule.
    pub fn position(&self, term: &Term) -> Option<usize> {
        self.0.get_index_of(term)
    }

    /// Every `(term, course_key)` pair across the whole schedule, skipping
    /// `FILLER`/`*Elective` placeholders.
    pub fn planned_courses(&self) -> Vec<(Term, String)> {
        self.0
            .iter()
            .flat_map(|(term, entry)| {
                entry
                    .course_keys()
                    .into_iter()
                    .filter(|c| !super::is_placeholder(c))
                    .map(move |c| (*term, c.to_string()))
            })
            .collect()
    }
}

impl Serialize for Schedule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (term, entry) in &self.0 {
            map.serialize_entry(&term.to_string(), entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: IndexMap<String, TermEntry> = IndexMap::deserialize(deserializer)?;
        let mut parsed = IndexMap::with_capacity(raw.len());
        for (label, entry) in raw {
            let term = Term::try_from(label).map_err(serde::de::Error::custom)?;
            parsed.insert(term, entry);
        }
        Ok(Schedule(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Season;

    fn term(season: Season, year: i32) -> Term {
        Term::new(season, year)
    }

    #[test]
    fn detailed_term_preserves_insertion_order_through_json() {
        let mut entry = IndexMap::new();
        entry.insert("COM SCI|31".to_string(), SectionChoice::default());
        entry.insert("MATH|31A".to_string(), SectionChoice::default());
        let mut schedule = Schedule::new();
        schedule.insert(term(Season::Fall, 2024), TermEntry::Detailed(entry));

        let json = serde_json::to_string(&schedule).unwrap();
        let round_tripped: Schedule = serde_json::from_str(&json).unwrap();
        let keys = round_tripped
            .get(&term(Season::Fall, 2024))
            .unwrap()
            .course_keys();
        assert_eq!(keys, vec!["COM SCI|31", "MATH|31A"]);
    }

    #[test]
    fn term_keys_serialize_in_chronological_insertion_order() {
        let mut schedule = Schedule::new();
        schedule.insert(term(Season::Fall, 2024), TermEntry::List(vec![]));
        schedule.insert(term(Season::Winter, 2025), TermEntry::List(vec![]));
        schedule.insert(term(Season::Spring, 2025), TermEntry::List(vec![]));

        let json = serde_json::to_string(&schedule).unwrap();
        let fall_pos = json.find("Fall 2024").unwrap();
        let winter_pos = json.find("Winter 2025").unwrap();
        let spring_pos = json.find("Spring 2025").unwrap();
        assert!(fall_pos < winter_pos);
        assert!(winter_pos < spring_pos);
    }

    #[test]
    fn list_term_deserializes_from_a_json_array() {
        let json = r#"{"Winter 2025": ["COM SCI|32", "FILLER"]}"#;
        let schedule: Schedule = serde_json::from_str(json).unwrap();
        let entry = schedule.get(&term(Season::Winter, 2025)).unwrap();
        assert_eq!(entry.course_keys(), vec!["COM SCI|32", "FILLER"]);
    }

    #[test]
    fn planned_courses_skip_placeholders() {
        let mut schedule = Schedule::new();
        schedule.insert(
            term(Season::Winter, 2025),
            TermEntry::List(vec!["COM SCI|32".to_string(), "FILLER".to_string()]),
        );
        let planned = schedule.planned_courses();
        assert_eq!(planned, vec![(term(Season::Winter, 2025), "COM SCI|32".to_string())]);
    }

    #[test]
    fn pad_with_filler_numbers_repeats_to_keep_detailed_keys_unique() {
        let mut entry = TermEntry::Detailed(IndexMap::new());
        entry.pad_with_filler(3);
        assert_eq!(entry.course_keys(), vec!["FILLER", "FILLER (2)", "FILLER (3)"]);
    }

    #[test]
    fn pad_with_filler_on_a_list_term_just_repeats_the_token() {
        let mut entry = TermEntry::List(vec!["COM SCI|31".to_string()]);
        entry.pad_with_filler(3);
        assert_eq!(entry.course_keys(), vec!["COM SCI|31", "FILLER", "FILLER (2)"]);
    }

    #[test]
    fn remove_one_filler_prefers_whatever_placeholder_is_found_first() {
        let mut entry = TermEntry::List(vec!["COM SCI|31".to_string(), "FILLER".to_string()]);
        assert!(entry.remove_one_filler());
        assert_eq!(entry.course_keys(), vec!["COM SCI|31"]);
        assert!(!entry.remove_one_filler());
    }

    #[test]
    fn remove_reports_whether_the_course_was_present() {
        let mut entry = TermEntry::List(vec!["COM SCI|32".to_string()]);
        assert!(entry.remove("COM SCI|32"));
        assert!(!entry.remove("COM SCI|32"));
    }
}
