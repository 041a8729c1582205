//! Error types for the projection engine
//!
//! Every operation either returns a complete result or one of these errors.
//! Nothing is retried and no partial result is ever produced.

use thiserror::Error;

/// The main error type for projection, planning and storage operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// A numeric input is outside its valid domain
    #[error("Invalid input '{field}': {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// Forward simulation ran past its horizon without reaching the goal
    #[error("Goal unreachable within {max_months} months; increase the contribution or the return rate")]
    GoalUnreachable { max_months: u32 },

    /// Budget allocation violates its invariants
    #[error("Invalid allocation: {0}")]
    AllocationInvalid(String),

    /// File or CSV errors while loading/saving data
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ProjectionError {
    /// Build an `InvalidInput` error for a named field
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Stable tag used by the HTTP surface
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::GoalUnreachable { .. } => "goal_unreachable",
            Self::AllocationInvalid(_) => "allocation_invalid",
            Self::Storage(_) => "storage",
        }
    }

    /// Check if this is a goal-unreachable condition
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::GoalUnreachable { .. })
    }
}

impl From<std::io::Error> for ProjectionError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<csv::Error> for ProjectionError {
    fn from(err: csv::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for projection operations
pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// Reject negative or non-finite currency amounts
pub(crate) fn ensure_amount(field: &'static str, value: f64) -> ProjectionResult<()> {
    if !value.is_finite() {
        return Err(ProjectionError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(ProjectionError::invalid(field, format!("must not be negative (got {value})")));
    }
    Ok(())
}
