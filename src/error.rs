//! Crate error type.

use crate::validation::ValidationError;

/// Errors raised while preparing, generating or reporting dispatch scenarios.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Input records failed integrity checks.
    #[error("invalid train input: {} problem(s), first: {}", .0.len(), first_message(.0))]
    Validation(Vec<ValidationError>),

    /// A forced-first scenario names a train that is not in the input.
    #[error("train {0} is not part of the input set")]
    UnknownTrain(String),

    /// A heuristic produced an ordering that is not a permutation of the input.
    #[error("scenario {scenario_id} has a broken ordering: {reason}")]
    BrokenOrdering { scenario_id: String, reason: String },

    /// Clock text could not be parsed.
    #[error("invalid clock time '{0}'")]
    InvalidClockTime(String),

    /// Priority level outside 1..=3.
    #[error("invalid priority level {0}, expected 1, 2 or 3")]
    InvalidPriority(u8),

    /// Engine configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The delay predictor could not produce an estimate.
    #[error("delay prediction failed for train {train_no}: {message}")]
    Prediction { train_no: String, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("none")
}

pub type Result<T> = std::result::Result<T, DispatchError>;
