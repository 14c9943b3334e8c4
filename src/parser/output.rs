//! Serializing planner and editor results into the response documents
//! written to standard output.

use crate::editor::EditResult;
use crate::planner::PlanOutcome;
use crate::types::Schedule;
use serde::Serialize;

/// The planner's response document. `note` is present only when one or more
/// required courses could not be placed in the window.
#[derive(Debug, Serialize)]
pub struct PlanOutputDocument {
    pub schedule: Schedule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<PlanOutcome> for PlanOutputDocument {
    fn from(outcome: PlanOutcome) -> Self {
        let note = if outcome.unplaceable.is_empty() {
            None
        } else {
            let names: Vec<String> = outcome.unplaceable.iter().map(|c| c.to_string()).collect();
            Some(format!("Unable to schedule: {}", names.join(", ")))
        };
        PlanOutputDocument {
            schedule: outcome.schedule,
            note,
        }
    }
}

/// The editor's response document.
#[derive(Debug, Serialize)]
pub struct EditOutputDocument {
    pub success: bool,
    pub message: String,
    pub schedule: Option<Schedule>,
}

impl From<EditResult> for EditOutputDocument {
    fn from(result: EditResult) -> Self {
        EditOutputDocument {
            success: result.success,
            message: result.message,
            schedule: result.schedule,
        }
    }
}
