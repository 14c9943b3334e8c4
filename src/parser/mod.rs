pub mod input;
pub mod output;

pub use input::{EditInputDocument, OperationDocument, PlanInputDocument, TechBreadthInputDocument};
pub use output::{EditOutputDocument, PlanOutputDocument};
