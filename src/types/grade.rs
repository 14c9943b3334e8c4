use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A letter grade, ordered from best (`APlus`) to worst (`F`) so that
/// `derive(PartialOrd, Ord)` matches the declared variant order — smaller
/// is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    D,
    #[serde(rename = "D-")]
    DMinus,
    F,
}

impl Grade {
    /// `true` iff `self` is at least as good as `minimum` under the total
    /// order `A+ > A > ... > D- > F`.
    pub fn meets_minimum(&self, minimum: Grade) -> bool {
        *self <= minimum
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::DMinus => "D-",
            Grade::F => "F",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "A+" => Grade::APlus,
            "A" => Grade::A,
            "A-" => Grade::AMinus,
            "B+" => Grade::BPlus,
            "B" => Grade::B,
            "B-" => Grade::BMinus,
            "C+" => Grade::CPlus,
            "C" => Grade::C,
            "C-" => Grade::CMinus,
            "D+" => Grade::DPlus,
            "D" => Grade::D,
            "D-" => Grade::DMinus,
            "F" => Grade::F,
            other => return Err(format!("unrecognized grade '{other}'")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_academic_convention() {
        assert!(Grade::APlus < Grade::A);
        assert!(Grade::A < Grade::BPlus);
        assert!(Grade::DMinus < Grade::F);
    }

    #[test]
    fn meets_minimum_is_inclusive() {
        assert!(Grade::DMinus.meets_minimum(Grade::DMinus));
        assert!(Grade::BPlus.meets_minimum(Grade::DMinus));
        assert!(!Grade::F.meets_minimum(Grade::DMinus));
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("B+".parse::<Grade>().unwrap(), Grade::BPlus);
        assert!("Z".parse::<Grade>().is_err());
    }
}
