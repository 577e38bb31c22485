//! Scenario quality metrics (KPIs).
//!
//! Computes the metric vector of one scenario from its entries, using the
//! platform and delay in effect in that scenario.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total / avg / max / min delay | Over effective predicted delays |
//! | Platform conflicts | Σ over platforms of `occupants − 1` |
//! | Express avg position | Mean `order` of priority-1 trains |
//! | Passenger satisfaction | `max(0, 100 − min(100, 2·avg) − 5·conflicts)` |
//! | Efficiency | `max(0, 100 − avg − 3·conflicts)` |
//!
//! The platform-conflict count is an occupancy upper bound, not the
//! adjacency check of [`ConflictDetector`](super::ConflictDetector).
//! Averages over zero trains are 0.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{PlatformOccupant, Priority, Scenario};

/// Scenario performance indicators.
///
/// Delays are in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    pub total_trains: usize,
    pub total_delay: f64,
    pub avg_delay: f64,
    pub max_delay: f64,
    pub min_delay: f64,
    /// Occupancy-based conflict count.
    pub platform_conflicts: usize,
    /// Mean 1-based position of express trains (0 if none).
    #[serde(rename = "express_trains_avg_position")]
    pub express_avg_position: f64,
    /// Passenger satisfaction in [0, 100].
    #[serde(rename = "passenger_satisfaction_score")]
    pub passenger_satisfaction: f64,
    /// Efficiency in [0, 100].
    pub efficiency_score: f64,
}

impl ScenarioMetrics {
    /// Computes the metrics of a scenario.
    pub fn calculate(scenario: &Scenario) -> Self {
        let entries = &scenario.entries;
        let total_trains = entries.len();

        let delays: Vec<f64> = entries.iter().map(|e| e.predicted_delay()).collect();
        let total_delay: f64 = delays.iter().sum();
        let (avg_delay, max_delay, min_delay) = if delays.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                total_delay / total_trains as f64,
                delays.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                delays.iter().copied().fold(f64::INFINITY, f64::min),
            )
        };

        let mut occupancy: HashMap<u32, usize> = HashMap::new();
        for entry in entries {
            *occupancy.entry(entry.platform()).or_insert(0) += 1;
        }
        let platform_conflicts: usize = occupancy
            .values()
            .filter(|&&n| n > 1)
            .map(|&n| n - 1)
            .sum();

        let express: Vec<f64> = entries
            .iter()
            .filter(|e| e.priority() == Priority::Express)
            .map(|e| e.order as f64)
            .collect();
        let express_avg_position = if express.is_empty() {
            0.0
        } else {
            express.iter().sum::<f64>() / express.len() as f64
        };

        let conflicts = platform_conflicts as f64;
        let delay_penalty = (avg_delay * 2.0).min(100.0);
        let conflict_penalty = conflicts * 5.0;
        let passenger_satisfaction = (100.0 - delay_penalty - conflict_penalty).max(0.0);
        let efficiency_score = (100.0 - avg_delay - conflicts * 3.0).max(0.0);

        Self {
            total_trains,
            total_delay,
            avg_delay,
            max_delay,
            min_delay,
            platform_conflicts,
            express_avg_position,
            passenger_satisfaction,
            efficiency_score,
        }
    }
}
