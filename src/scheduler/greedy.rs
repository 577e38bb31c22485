//! Single-plan greedy dispatcher.
//!
//! # Algorithm
//!
//! 1. Normalize every train's scheduled slot with its predicted delay.
//! 2. Run the conflict detector on the input platform assignment
//!    (advisory; the ordering ignores it).
//! 3. Sort by the multi-criteria key: priority class, predicted delay,
//!    distance (descending), scheduled arrival.
//! 4. Number the result 1..=N.
//!
//! # Complexity
//! O(n log n) for the sort plus O(n log n) for conflict detection.

use std::sync::Arc;

use serde::Serialize;

use super::ConflictDetector;
use crate::config::EngineConfig;
use crate::dispatching::RuleEngine;
use crate::heuristics::MlOptimized;
use crate::models::{ConflictRecord, PlatformOccupant, Priority, ScenarioEntry, TrainRecord};
use crate::observer::DispatchObserver;

/// One train in a dispatch plan, with rendered times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedTrain {
    /// 1-based dispatch position.
    pub order: usize,
    pub train_no: String,
    pub train_name: String,
    pub train_type: String,
    pub platform_no: u32,
    pub priority: Priority,
    pub predicted_delay: f64,
    pub distance: f64,
    pub weather: String,
    pub source: String,
    pub destination: String,
    /// "HH:MM".
    pub scheduled_arrival: String,
    pub scheduled_departure: String,
    /// "HH:MM", not wrapped past midnight.
    pub actual_arrival_time: String,
    pub actual_departure_time: String,
}

impl PlannedTrain {
    fn from_entry(entry: &ScenarioEntry) -> Self {
        let train = entry.train();
        let timing = entry.actual_timing();
        Self {
            order: entry.order,
            train_no: train.train_no.clone(),
            train_name: train.train_name.clone(),
            train_type: train.train_type.clone(),
            platform_no: entry.platform(),
            priority: train.priority,
            predicted_delay: entry.predicted_delay(),
            distance: train.distance,
            weather: train.weather.clone(),
            source: train.source.clone(),
            destination: train.destination.clone(),
            scheduled_arrival: train.scheduled_arrival.to_string(),
            scheduled_departure: train.scheduled_departure.to_string(),
            actual_arrival_time: timing.arrival_label(),
            actual_departure_time: timing.departure_label(),
        }
    }
}

/// Summary figures of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanSummary {
    pub train_count: usize,
    /// Mean predicted delay, 0 for an empty plan.
    pub avg_delay: f64,
    pub total_distance: f64,
}

/// The result of a greedy dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchPlan {
    pub trains: Vec<PlannedTrain>,
    pub conflicts: Vec<ConflictRecord>,
    pub summary: PlanSummary,
}

impl DispatchPlan {
    /// Train numbers in dispatch order.
    pub fn train_order(&self) -> Vec<&str> {
        self.trains.iter().map(|t| t.train_no.as_str()).collect()
    }
}

/// Greedy dispatcher producing one recommended order.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use u_dispatch::models::TrainRecord;
/// use u_dispatch::observer::NullObserver;
/// use u_dispatch::scheduler::GreedyDispatcher;
///
/// let trains = vec![
///     Arc::new(TrainRecord::new("12951").with_type("Superfast").with_delay(6.0)),
///     Arc::new(TrainRecord::new("59441").with_type("Passenger").with_delay(1.0)),
/// ];
/// let plan = GreedyDispatcher::new().dispatch(&trains, &NullObserver);
/// assert_eq!(plan.train_order(), vec!["12951", "59441"]);
/// ```
#[derive(Debug, Clone)]
pub struct GreedyDispatcher {
    detector: ConflictDetector,
    rule_engine: RuleEngine,
}

impl GreedyDispatcher {
    /// Creates a dispatcher with the default thresholds and sort key.
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            detector: ConflictDetector::from_config(config),
            rule_engine: MlOptimized::engine(),
        }
    }

    /// Replaces the sort key.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// Builds the plan for `trains`.
    pub fn dispatch(
        &self,
        trains: &[Arc<TrainRecord>],
        observer: &dyn DispatchObserver,
    ) -> DispatchPlan {
        let mut entries: Vec<ScenarioEntry> =
            trains.iter().cloned().map(ScenarioEntry::new).collect();
        let conflicts = self.detector.detect(&entries, observer);

        self.rule_engine.sort(&mut entries);
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.order = i + 1;
        }

        let train_count = entries.len();
        let total_delay: f64 = entries.iter().map(|e| e.predicted_delay()).sum();
        let summary = PlanSummary {
            train_count,
            avg_delay: if train_count == 0 {
                0.0
            } else {
                total_delay / train_count as f64
            },
            total_distance: trains.iter().map(|t| t.distance).sum(),
        };

        DispatchPlan {
            trains: entries.iter().map(PlannedTrain::from_entry).collect(),
            conflicts,
            summary,
        }
    }
}

impl Default for GreedyDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
