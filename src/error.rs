use thiserror::Error;

/// Domain-specific errors for the planner, schedule editor, and tech-breadth
/// optimizer.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Malformed request, unknown terms, or an empty plan horizon.
    #[error("invalid input: {0}")]
    InputError(String),

    /// Exhausted retries on a catalog query.
    #[error("catalog unavailable after {attempts} attempts: {message}")]
    CatalogUnavailable { attempts: u32, message: String },

    /// An editor mutation would break requisite ordering.
    #[error("requisite unmet: {0}")]
    RequisiteUnmet(String),

    /// An editor or planner operation would violate the active time-conflict
    /// policy.
    #[error("time conflict: {0}")]
    TimeConflict(String),

    /// A required course could not be placed in any term of the window.
    /// Recorded in the planner's `note` field, never raised as a failure.
    #[error("course not offered in the planning window: {0}")]
    OfferingUnavailable(String),

    /// The editor received an incoherent operation, e.g. `change_section`
    /// outside the earliest term.
    #[error("invalid operation: {0}")]
    OperationInvalid(String),

    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },
}

/// `anyhow::Result` at API boundaries, with `?` propagating through
/// library error types via `From` conversions.
pub type Result<T> = anyhow::Result<T>;
