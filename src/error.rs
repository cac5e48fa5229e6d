//! Engine error type.

use crate::validation::ValidationError;

/// Errors returned by the engine entry points.
///
/// Data-quality issues (unfillable slots, degenerate phases, empty search
/// spaces) are never errors; these variants cover input the engine cannot
/// interpret at all.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    /// The planning year has no calendar representation.
    #[error("invalid planning year {0}")]
    InvalidYear(i32),
    /// Structural input checks failed.
    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}
