//! Degree planner: places a student's required courses into terms honoring
//! prerequisite/corequisite rules, offering availability, and load bounds,
//! picks lecture/discussion sections for the earliest term under scored
//! preferences and conflict avoidance, supports localized schedule edits,
//! and ranks tech-breadth electives by missing-prerequisite count.
//!
//! # Pipeline
//!
//! 1. **Catalog Gateway** (`catalog`): read-only query surface over subjects,
//!    courses, and sections.
//! 2. **Requisite Engine** (`requisite`): normalizes requisite trees to DNF
//!    and expands the transitive closure of required prerequisites.
//! 3. **Offering Index** (`offering`): per-course set of terms with a usable
//!    section.
//! 4. **Planner** (`planner`): term-by-term placement under requisite,
//!    offering, and load constraints.
//! 5. **First-Term Section Selector** (`selector`): scores and selects
//!    lecture/discussion pairings for the earliest term.
//! 6. **Schedule Editor** (`editor`): atomic move/swap/change-section
//!    mutations.
//! 7. **Tech-Breadth Optimizer** (`tech_breadth`): ranks elective candidates
//!    by missing-prerequisite count.
//!
//! # Example
//!
//! ```no_run
//! use degree_planner::catalog::{load_fixtures, InMemoryCatalogGateway};
//! use degree_planner::planner::{plan, PlanRequest};
//! use degree_planner::types::{term_sequence, PlannerConfig, Season, Term};
//! use std::collections::HashMap;
//! use std::path::Path;
//!
//! let data = load_fixtures(Path::new("./catalog")).unwrap();
//! let gateway = InMemoryCatalogGateway::new(data);
//! let request = PlanRequest {
//!     window: term_sequence(Term::new(Season::Fall, 2024), Term::new(Season::Spring, 2025)),
//!     courses_to_schedule: vec!["COM SCI|31".into()],
//!     transcript: HashMap::new(),
//!     config: PlannerConfig::default(),
//! };
//! let outcome = plan(&gateway, &request).unwrap();
//! println!("unplaceable: {:?}", outcome.unplaceable);
//! ```

pub mod catalog;
pub mod editor;
pub mod error;
pub mod offering;
pub mod parser;
pub mod planner;
pub mod reporter;
pub mod requisite;
pub mod selector;
pub mod tech_breadth;
pub mod types;

pub use error::{PlannerError, Result};
