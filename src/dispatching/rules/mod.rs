//! Built-in ordering rules.
//!
//! # Categories
//!
//! - **Timetable**: SCHEDULED_ARRIVAL
//! - **Class**: PRIORITY
//! - **Delay**: LEAST_DELAY, MOST_DELAY
//! - **Route**: LONGEST_DISTANCE
//! - **Platform**: PLATFORM
//!
//! # Score Convention
//! All rules return lower scores for entries that should be dispatched
//! first. Delay and platform rules read the scenario's effective values.

use super::{OrderingRule, RuleScore};
use crate::models::{PlatformOccupant, ScenarioEntry};

// ======================== Timetable rules ========================

/// Scheduled arrival, minutes of day (original timetable order).
#[derive(Debug, Clone, Copy)]
pub struct ScheduledArrival;

impl OrderingRule for ScheduledArrival {
    fn name(&self) -> &'static str {
        "SCHEDULED_ARRIVAL"
    }

    fn evaluate(&self, entry: &ScenarioEntry) -> RuleScore {
        entry.train().scheduled_arrival_minutes() as f64
    }

    fn description(&self) -> &'static str {
        "Earliest Scheduled Arrival"
    }
}

// ======================== Class rules ========================

/// Priority class level: express (1) before other (2) before local (3).
#[derive(Debug, Clone, Copy)]
pub struct PriorityClass;

impl OrderingRule for PriorityClass {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, entry: &ScenarioEntry) -> RuleScore {
        entry.priority().level() as f64
    }

    fn description(&self) -> &'static str {
        "Priority Class"
    }
}

// ======================== Delay rules ========================

/// Smallest predicted delay first.
#[derive(Debug, Clone, Copy)]
pub struct LeastDelay;

impl OrderingRule for LeastDelay {
    fn name(&self) -> &'static str {
        "LEAST_DELAY"
    }

    fn evaluate(&self, entry: &ScenarioEntry) -> RuleScore {
        entry.predicted_delay()
    }

    fn description(&self) -> &'static str {
        "Least Predicted Delay"
    }
}

/// Largest predicted delay first (backlog clearing).
#[derive(Debug, Clone, Copy)]
pub struct MostDelay;

impl OrderingRule for MostDelay {
    fn name(&self) -> &'static str {
        "MOST_DELAY"
    }

    fn evaluate(&self, entry: &ScenarioEntry) -> RuleScore {
        -entry.predicted_delay()
    }

    fn description(&self) -> &'static str {
        "Most Predicted Delay"
    }
}

// ======================== Route rules ========================

/// Longest route first.
#[derive(Debug, Clone, Copy)]
pub struct LongestDistance;

impl OrderingRule for LongestDistance {
    fn name(&self) -> &'static str {
        "LONGEST_DISTANCE"
    }

    fn evaluate(&self, entry: &ScenarioEntry) -> RuleScore {
        -entry.train().distance
    }

    fn description(&self) -> &'static str {
        "Longest Route Distance"
    }
}

// ======================== Platform rules ========================

/// Lowest platform number first.
#[derive(Debug, Clone, Copy)]
pub struct Platform;

impl OrderingRule for Platform {
    fn name(&self) -> &'static str {
        "PLATFORM"
    }

    fn evaluate(&self, entry: &ScenarioEntry) -> RuleScore {
        entry.platform() as f64
    }

    fn description(&self) -> &'static str {
        "Platform Number"
    }
}
