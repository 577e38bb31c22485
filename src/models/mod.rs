//! Dispatch domain models.
//!
//! Provides the data types for representing a control-station dispatch
//! problem (trains competing for platforms) and its candidate solutions
//! (scenarios).
//!
//! # Domain Mappings
//!
//! | Dispatch | Scheduling | Meaning |
//! |------------|------------|---------|
//! | TrainRecord | Job | One physical train with its timetable slot |
//! | Platform | Machine | Shared station capacity |
//! | Scenario | Schedule | One complete candidate ordering |
//! | ConflictRecord | Violation | Two trains too close on one platform |
//!
//! # Time Representation
//! Times are minutes of day (`hour * 60 + minute`). Actual times add the
//! predicted delay and are NOT wrapped at midnight.

mod clock;
mod conflict;
mod scenario;
mod train;

pub use clock::{format_minutes, ActualTiming, ClockTime};
pub use conflict::{ConflictRecord, ConflictSeverity};
pub use scenario::{EntryAnnotations, Scenario, ScenarioEntry};
pub use train::{Priority, TrainRecord, DEFAULT_DISTANCE_KM, DEFAULT_WEATHER};

/// Anything that occupies a platform for a scheduled window.
///
/// Implemented by raw [`TrainRecord`]s (their own assignment) and by
/// [`ScenarioEntry`]s (which may override platform and delay).
pub trait PlatformOccupant {
    /// The underlying train.
    fn train(&self) -> &TrainRecord;
    /// Platform in effect.
    fn platform(&self) -> u32;
    /// Predicted delay in effect (minutes).
    fn predicted_delay(&self) -> f64;

    /// Actual arrival/departure in effect.
    fn actual_timing(&self) -> ActualTiming {
        ActualTiming::of(self.train(), self.predicted_delay())
    }
}

impl PlatformOccupant for TrainRecord {
    fn train(&self) -> &TrainRecord {
        self
    }

    fn platform(&self) -> u32 {
        self.platform_no
    }

    fn predicted_delay(&self) -> f64 {
        self.predicted_delay
    }
}
