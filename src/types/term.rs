use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three quarters the planning window is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Fall,
    Winter,
    Spring,
}

impl Season {
    const ORDER: [Season; 3] = [Season::Fall, Season::Winter, Season::Spring];

    /// Chronological rank within a calendar year: Winter and Spring of year
    /// `Y` both precede Fall of that same year (Fall `Y` is followed by
    /// Winter `Y+1`, so it sits last in `Y`'s own cycle).
    const CHRONOLOGICAL: [Season; 3] = [Season::Winter, Season::Spring, Season::Fall];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|s| *s == self).unwrap()
    }

    fn chronological_rank(self) -> usize {
        Self::CHRONOLOGICAL.iter().position(|s| *s == self).unwrap()
    }

    fn next(self) -> Season {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Season::Fall => "Fall",
            Season::Winter => "Winter",
            Season::Spring => "Spring",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fall" => Ok(Season::Fall),
            "Winter" => Ok(Season::Winter),
            "Spring" => Ok(Season::Spring),
            other => Err(format!("unrecognized season '{other}'")),
        }
    }
}

/// A `(season, year)` pair identifying a single scheduling unit, carried
/// over the wire as its display string (e.g. `"Fall 2024"`) so it can
/// double as a JSON object key in a `Schedule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Term {
    pub season: Season,
    pub year: i32,
}

impl TryFrom<String> for Term {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (season, year) = value
            .split_once(' ')
            .ok_or_else(|| format!("invalid term label '{value}', expected '<Season> <year>'"))?;
        let season: Season = season.parse()?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("invalid year in term label '{value}'"))?;
        Ok(Term::new(season, year))
    }
}

impl From<Term> for String {
    fn from(term: Term) -> Self {
        term.to_string()
    }
}

impl Term {
    pub fn new(season: Season, year: i32) -> Self {
        Self { season, year }
    }

    /// Ordinal position for comparisons: within a calendar year, Winter
    /// precedes Spring precedes Fall (Fall is the last term of its own
    /// year's cycle, since the next term is Winter of `year + 1`).
    fn ordinal(&self) -> (i32, usize) {
        (self.year, self.season.chronological_rank())
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.season, self.year)
    }
}

/// Build the inclusive, ordered sequence of terms from `(start_season,
/// start_year)` to `(end_season, end_year)`. The year advances whenever the
/// season rolls from Fall back to Winter, matching the academic calendar
/// (Fall of year Y is followed by Winter of year Y+1).
pub fn term_sequence(start: Term, end: Term) -> Vec<Term> {
    let mut seq = Vec::new();
    let mut current = start;
    loop {
        seq.push(current);
        if current == end {
            break;
        }
        let next_year = if current.season == Season::Fall {
            current.year + 1
        } else {
            current.year
        };
        current = Term::new(current.season.next(), next_year);
        // Guard against a malformed (start > end) window producing an
        // unbounded loop.
        if seq.len() > 64 {
            break;
        }
    }
    seq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_spans_a_year_boundary() {
        let seq = term_sequence(Term::new(Season::Fall, 2024), Term::new(Season::Spring, 2025));
        assert_eq!(
            seq,
            vec![
                Term::new(Season::Fall, 2024),
                Term::new(Season::Winter, 2025),
                Term::new(Season::Spring, 2025),
            ]
        );
    }

    #[test]
    fn single_term_window() {
        let seq = term_sequence(Term::new(Season::Fall, 2024), Term::new(Season::Fall, 2024));
        assert_eq!(seq, vec![Term::new(Season::Fall, 2024)]);
    }

    #[test]
    fn display_matches_json_contract() {
        assert_eq!(Term::new(Season::Winter, 2025).to_string(), "Winter 2025");
    }

    #[test]
    fn round_trips_through_its_string_form() {
        let term = Term::new(Season::Winter, 2025);
        let label: String = term.into();
        assert_eq!(label, "Winter 2025");
        assert_eq!(Term::try_from(label).unwrap(), term);
    }

    #[test]
    fn rejects_a_malformed_label() {
        assert!(Term::try_from("Summer 2025".to_string()).is_err());
        assert!(Term::try_from("Fall".to_string()).is_err());
    }

    #[test]
    fn ordering_respects_the_fall_winter_spring_cycle() {
        assert!(Term::new(Season::Fall, 2024) < Term::new(Season::Winter, 2025));
        assert!(Term::new(Season::Winter, 2025) < Term::new(Season::Spring, 2025));
        assert!(Term::new(Season::Spring, 2025) < Term::new(Season::Fall, 2025));
    }
}
