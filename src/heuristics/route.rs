//! Same-route spacing heuristic.

use rand::RngCore;
use std::collections::HashMap;
use std::sync::Arc;

use super::{fresh_entries, ScenarioHeuristic};
use crate::dispatching::{rules, RuleEngine};
use crate::error::Result;
use crate::models::{PlatformOccupant, Scenario, TrainRecord};

/// Spaces out trains that share a (source, destination) pair.
///
/// # Algorithm
/// Within each route group of two or more trains, sort by delay and add
/// `spacing × index` minutes to the scenario's delay of every non-first
/// train. The whole set is then ordered by the adjusted delay.
///
/// Only the scenario overlay changes; base records keep their prediction.
#[derive(Debug, Clone, Copy)]
pub struct RouteSpaced {
    spacing_minutes: f64,
}

impl RouteSpaced {
    pub fn new(spacing_minutes: f64) -> Self {
        Self { spacing_minutes }
    }
}

impl Default for RouteSpaced {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl ScenarioHeuristic for RouteSpaced {
    fn scenario_id(&self) -> String {
        "ROUTE_SPACED".to_string()
    }

    fn build(&self, trains: &[Arc<TrainRecord>], _rng: &mut dyn RngCore) -> Result<Scenario> {
        let mut entries = fresh_entries(trains);

        let mut groups: HashMap<(&str, &str), Vec<usize>> = HashMap::new();
        for (i, train) in trains.iter().enumerate() {
            groups
                .entry((train.source.as_str(), train.destination.as_str()))
                .or_default()
                .push(i);
        }

        for members in groups.values_mut().filter(|m| m.len() > 1) {
            members.sort_by(|&a, &b| {
                entries[a]
                    .predicted_delay()
                    .partial_cmp(&entries[b].predicted_delay())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            for (rank, &idx) in members.iter().enumerate().skip(1) {
                let added = rank as f64 * self.spacing_minutes;
                let entry = &mut entries[idx];
                entry.add_delay(added);
                entry.annotations.time_spacing_added = Some(added);
                entry.annotations.route_spacing_applied = true;
            }
        }

        RuleEngine::new().with_rule(rules::LeastDelay).sort(&mut entries);

        Ok(Scenario::new(self.scenario_id(), "Same Route Trains Spaced")
            .with_description("Trains on same routes spaced out to avoid track conflicts")
            .with_use_case("When same-route trains are causing track congestion")
            .with_ordering(entries))
    }
}
