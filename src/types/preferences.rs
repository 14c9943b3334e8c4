use super::{ClockTime, Day};
use serde::{Deserialize, Serialize};

/// The four scorable preference axes, named so a `priority` list can rank
/// them against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceAxis {
    Time,
    Building,
    Days,
    Instructor,
}

/// Student scheduling preferences, fed into the first-term section
/// selector's scoring function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    pub earliest: ClockTime,
    pub latest: ClockTime,
    #[serde(default)]
    pub forbidden_days: Vec<Day>,
    #[serde(default)]
    pub preferred_buildings: Vec<String>,
    #[serde(default)]
    pub preferred_instructors: Vec<String>,
    /// Ranks the four scoring axes from highest to lowest priority; the
    /// first axis receives the highest weight.
    pub priority: Vec<PreferenceAxis>,
    pub max_per_term: u32,
    pub min_per_term: u32,
    #[serde(default)]
    pub allow_warnings: bool,
    #[serde(default)]
    pub allow_primary_conflicts: bool,
    #[serde(default)]
    pub allow_secondary_conflicts: bool,
}

impl Preferences {
    /// Weight for each axis by inverse rank: the first axis in `priority`
    /// gets `priority.len()`, the last gets `1`. An axis absent from
    /// `priority` contributes no score.
    pub fn weight(&self, axis: PreferenceAxis) -> u32 {
        self.priority
            .iter()
            .position(|a| *a == axis)
            .map(|rank| (self.priority.len() - rank) as u32)
            .unwrap_or(0)
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            earliest: ClockTime::new(9, 0),
            latest: ClockTime::new(10, 0),
            forbidden_days: vec![Day::Friday],
            preferred_buildings: vec!["MS".to_string(), "SCI".to_string()],
            preferred_instructors: vec![],
            priority: vec![
                PreferenceAxis::Time,
                PreferenceAxis::Building,
                PreferenceAxis::Days,
                PreferenceAxis::Instructor,
            ],
            max_per_term: 5,
            min_per_term: 3,
            allow_warnings: true,
            allow_primary_conflicts: true,
            allow_secondary_conflicts: true,
        }
    }
}
