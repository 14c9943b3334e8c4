use super::{CourseKey, SectionId, Term};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A day of the week, ordered Monday-first the way the glossary lists
/// `{M,T,W,R,F,S,U}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    fn letter(self) -> char {
        match self {
            Day::Monday => 'M',
            Day::Tuesday => 'T',
            Day::Wednesday => 'W',
            Day::Thursday => 'R',
            Day::Friday => 'F',
            Day::Saturday => 'S',
            Day::Sunday => 'U',
        }
    }

    fn from_letter(c: char) -> Option<Day> {
        Some(match c {
            'M' => Day::Monday,
            'T' => Day::Tuesday,
            'W' => Day::Wednesday,
            'R' => Day::Thursday,
            'F' => Day::Friday,
            'S' => Day::Saturday,
            'U' => Day::Sunday,
            _ => return None,
        })
    }
}

/// A set of days, rendered as concatenated uppercase letters (e.g. `"MW"`)
/// per the external JSON contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DaySet(pub Vec<Day>);

impl DaySet {
    pub fn new(days: impl IntoIterator<Item = Day>) -> Self {
        let mut set = Vec::new();
        for d in days {
            if !set.contains(&d) {
                set.push(d);
            }
        }
        set.sort();
        DaySet(set)
    }

    pub fn is_disjoint(&self, other: &DaySet) -> bool {
        !self.0.iter().any(|d| other.0.contains(d))
    }

    pub fn intersects(&self, other: &DaySet) -> bool {
        !self.is_disjoint(other)
    }
}

impl TryFrom<String> for DaySet {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let mut days = Vec::new();
        for c in value.chars() {
            let day = Day::from_letter(c)
                .ok_or_else(|| format!("unrecognized day letter '{c}' in day-set '{value}'"))?;
            days.push(day);
        }
        Ok(DaySet::new(days))
    }
}

impl From<DaySet> for String {
    fn from(set: DaySet) -> Self {
        set.0.iter().map(|d| d.letter()).collect()
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.0 {
            write!(f, "{}", d.letter())?;
        }
        Ok(())
    }
}

/// Wall-clock minutes-of-day; avoids floating point entirely.
/// `"09:30"` is represented as `570`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(pub u16);

impl ClockTime {
    pub fn new(hour: u16, minute: u16) -> Self {
        ClockTime(hour * 60 + minute)
    }

    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    pub fn minute(&self) -> u16 {
        self.0 % 60
    }
}

impl TryFrom<String> for ClockTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (h, m) = value
            .split_once(':')
            .ok_or_else(|| format!("invalid clock time '{value}', expected 'HH:MM'"))?;
        let hour: u16 = h
            .parse()
            .map_err(|_| format!("invalid hour in clock time '{value}'"))?;
        let minute: u16 = m
            .parse()
            .map_err(|_| format!("invalid minute in clock time '{value}'"))?;
        if hour > 23 || minute > 59 {
            return Err(format!("clock time '{value}' out of range"));
        }
        Ok(ClockTime::new(hour, minute))
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        format!("{:02}:{:02}", t.hour(), t.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// One weekly meeting pattern of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingSlot {
    pub days: DaySet,
    pub start: ClockTime,
    pub end: ClockTime,
    pub building: String,
    pub room: String,
}

impl MeetingSlot {
    /// Two meeting slots conflict iff their day-sets intersect AND their
    /// half-open time intervals `[start, end)` overlap.
    pub fn conflicts_with(&self, other: &MeetingSlot) -> bool {
        self.days.intersects(&other.days) && self.start < other.end && other.start < self.end
    }
}

/// An instructor of record for a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: String,
    pub name: String,
}

/// A section of a course offered in a specific term: either primary
/// (lecture-like) or secondary (discussion-like).
///
/// Serializes onto the wire (schedule JSON, catalog fixtures' sibling
/// `sections.json`) with only the fields the external contract names —
/// `course`, `term`, and `is_primary` are catalog-internal bookkeeping the
/// planner needs to pick and pair sections, not part of the section object
/// a client sees embedded in a schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub course: CourseKey,
    pub term: Term,
    /// Section code, e.g. `"1-1A"`; the portion before the first `-` is
    /// shared between a lecture and its associated discussions.
    pub section: String,
    pub is_primary: bool,
    pub activity: String,
    pub enrollment_cap: u32,
    pub enrollment_total: u32,
    pub waitlist_cap: u32,
    pub waitlist_total: u32,
    pub times: Vec<MeetingSlot>,
    pub instructors: Vec<Instructor>,
}

impl Serialize for Section {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Section", 8)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("section", &self.section)?;
        state.serialize_field("activity", &self.activity)?;
        state.serialize_field("enrollment_cap", &self.enrollment_cap)?;
        state.serialize_field("enrollment_total", &self.enrollment_total)?;
        state.serialize_field("waitlist_cap", &self.waitlist_cap)?;
        state.serialize_field("waitlist_total", &self.waitlist_total)?;
        state.serialize_field("times", &self.times)?;
        let instructor_names: Vec<&str> = self.instructors.iter().map(|i| i.name.as_str()).collect();
        state.serialize_field("instructors", &instructor_names)?;
        state.end()
    }
}

impl Section {
    /// Not simultaneously full in both enrollment and waitlist.
    pub fn is_usable(&self) -> bool {
        self.enrollment_total < self.enrollment_cap || self.waitlist_total < self.waitlist_cap
    }

    /// The portion of the section code shared between a lecture and the
    /// discussions that belong to it (everything before the first `-`).
    pub fn code_prefix(&self) -> &str {
        self.section.split('-').next().unwrap_or(&self.section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_set_round_trips() {
        let set = DaySet::try_from("MWF".to_string()).unwrap();
        assert_eq!(set.to_string(), "MWF");
    }

    #[test]
    fn day_set_normalizes_order_and_dedupes() {
        let set = DaySet::new([Day::Friday, Day::Monday, Day::Monday]);
        assert_eq!(set.to_string(), "MF");
    }

    #[test]
    fn clock_time_parses_and_formats() {
        let t = ClockTime::try_from("09:05".to_string()).unwrap();
        assert_eq!(t.0, 545);
        assert_eq!(t.to_string(), "09:05");
    }

    #[test]
    fn meeting_slots_conflict_on_shared_day_and_overlapping_time() {
        let a = MeetingSlot {
            days: DaySet::new([Day::Monday, Day::Wednesday]),
            start: ClockTime::new(9, 0),
            end: ClockTime::new(9, 50),
            building: "MS".into(),
            room: "1".into(),
        };
        let b = MeetingSlot {
            days: DaySet::new([Day::Monday]),
            start: ClockTime::new(9, 30),
            end: ClockTime::new(10, 20),
            building: "MS".into(),
            room: "2".into(),
        };
        assert!(a.conflicts_with(&b));
    }

    #[test]
    fn meeting_slots_touching_at_boundary_do_not_conflict() {
        let a = MeetingSlot {
            days: DaySet::new([Day::Monday]),
            start: ClockTime::new(9, 0),
            end: ClockTime::new(9, 50),
            building: "MS".into(),
            room: "1".into(),
        };
        let b = MeetingSlot {
            days: DaySet::new([Day::Monday]),
            start: ClockTime::new(9, 50),
            end: ClockTime::new(10, 40),
            building: "MS".into(),
            room: "1".into(),
        };
        assert!(!a.conflicts_with(&b));
    }

    #[test]
    fn disjoint_days_never_conflict() {
        let a = MeetingSlot {
            days: DaySet::new([Day::Monday]),
            start: ClockTime::new(9, 0),
            end: ClockTime::new(9, 50),
            building: "MS".into(),
            room: "1".into(),
        };
        let b = MeetingSlot {
            days: DaySet::new([Day::Tuesday]),
            start: ClockTime::new(9, 0),
            end: ClockTime::new(9, 50),
            building: "MS".into(),
            room: "1".into(),
        };
        assert!(!a.conflicts_with(&b));
    }

    #[test]
    fn usable_iff_not_full_on_both_axes() {
        let mut section = test_section();
        section.enrollment_total = 30;
        section.enrollment_cap = 30;
        section.waitlist_total = 0;
        section.waitlist_cap = 5;
        assert!(section.is_usable());

        section.waitlist_total = 5;
        assert!(!section.is_usable());
    }

    #[test]
    fn code_prefix_splits_on_first_dash() {
        let mut section = test_section();
        section.section = "1-1A".to_string();
        assert_eq!(section.code_prefix(), "1");
    }

    #[test]
    fn serializes_only_the_wire_contract_fields_with_instructor_names() {
        let mut section = test_section();
        section.instructors = vec![Instructor {
            id: "i1".to_string(),
            name: "Prof X".to_string(),
        }];
        let json = serde_json::to_value(&section).unwrap();
        let obj = json.as_object().unwrap();
        for field in [
            "id",
            "section",
            "activity",
            "enrollment_cap",
            "enrollment_total",
            "waitlist_cap",
            "waitlist_total",
            "times",
            "instructors",
        ] {
            assert!(obj.contains_key(field), "missing field '{field}'");
        }
        for field in ["course", "term", "is_primary"] {
            assert!(!obj.contains_key(field), "unexpected internal field '{field}'");
        }
        assert_eq!(json["instructors"], serde_json::json!(["Prof X"]));
    }

    fn test_section() -> Section {
        Section {
            id: SectionId("sec1".to_string()),
            course: CourseKey::new("COM SCI", "31"),
            term: Term::new(super::super::Season::Fall, 2024),
            section: "1".to_string(),
            is_primary: true,
            activity: "Lec".to_string(),
            enrollment_cap: 200,
            enrollment_total: 0,
            waitlist_cap: 20,
            waitlist_total: 0,
            times: vec![],
            instructors: vec![],
        }
    }
}
