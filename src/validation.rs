//! Input validation for dispatch problems.
//!
//! Checks structural integrity of train records before any scenario is
//! generated. Detects:
//! - Duplicate train numbers
//! - Platform numbers below 1
//! - Clock times outside 00:00..23:59
//! - Non-finite delays or distances
//!
//! Negative delays are accepted; upstream preparation owns that policy.

use crate::models::TrainRecord;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending train number.
    pub train_no: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two trains share the same number.
    DuplicateTrain,
    /// Platform number is 0.
    InvalidPlatform,
    /// Hour or minute out of range.
    InvalidClockTime,
    /// Delay is NaN or infinite.
    NonFiniteDelay,
    /// Distance is NaN or infinite.
    NonFiniteDistance,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, train_no: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            train_no: train_no.to_string(),
            message: message.into(),
        }
    }
}

/// Validates train records.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_trains(trains: &[TrainRecord]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for train in trains {
        let no = train.train_no.as_str();

        if !seen.insert(no) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateTrain,
                no,
                format!("Duplicate train number: {no}"),
            ));
        }

        if train.platform_no == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPlatform,
                no,
                format!("Train '{no}' has platform 0"),
            ));
        }

        for (label, time) in [
            ("arrival", train.scheduled_arrival),
            ("departure", train.scheduled_departure),
        ] {
            if !time.is_valid() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidClockTime,
                    no,
                    format!("Train '{no}' has invalid {label} time {time}"),
                ));
            }
        }

        if !train.predicted_delay.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteDelay,
                no,
                format!("Train '{no}' has non-finite delay"),
            ));
        }

        if !train.distance.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteDistance,
                no,
                format!("Train '{no}' has non-finite distance"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
