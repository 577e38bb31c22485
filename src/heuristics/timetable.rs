//! Timetable-order and multi-criteria greedy heuristics.

use rand::RngCore;
use std::sync::Arc;

use super::{fresh_entries, ScenarioHeuristic};
use crate::dispatching::{rules, RuleEngine};
use crate::error::Result;
use crate::models::{Scenario, TrainRecord};

/// Original timetable order (scheduled arrival).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTimetable;

impl ScenarioHeuristic for DefaultTimetable {
    fn scenario_id(&self) -> String {
        "DEFAULT".to_string()
    }

    fn build(&self, trains: &[Arc<TrainRecord>], _rng: &mut dyn RngCore) -> Result<Scenario> {
        let mut entries = fresh_entries(trains);
        RuleEngine::new()
            .with_rule(rules::ScheduledArrival)
            .sort(&mut entries);

        Ok(Scenario::new(self.scenario_id(), "Default Timetable Order")
            .with_description("Original scheduled order based on arrival times")
            .with_use_case("Normal operations, no disruptions")
            .with_ordering(entries))
    }
}

/// Multi-criteria greedy order.
///
/// # Sort key
/// 1. Priority class (express first)
/// 2. Predicted delay (ascending)
/// 3. Distance (descending, long runs keep their slot)
/// 4. Scheduled arrival
#[derive(Debug, Clone, Copy, Default)]
pub struct MlOptimized;

impl MlOptimized {
    /// The rule chain shared with the single-plan greedy dispatcher.
    pub fn engine() -> RuleEngine {
        RuleEngine::new()
            .with_rule(rules::PriorityClass)
            .with_rule(rules::LeastDelay)
            .with_rule(rules::LongestDistance)
            .with_rule(rules::ScheduledArrival)
    }
}

impl ScenarioHeuristic for MlOptimized {
    fn scenario_id(&self) -> String {
        "ML_OPTIMIZED".to_string()
    }

    fn build(&self, trains: &[Arc<TrainRecord>], _rng: &mut dyn RngCore) -> Result<Scenario> {
        let mut entries = fresh_entries(trains);
        Self::engine().sort(&mut entries);

        Ok(Scenario::new(self.scenario_id(), "ML Optimized Schedule")
            .with_description("AI-optimized based on priority, delay prediction, and distance")
            .with_use_case("Optimal performance under normal conditions")
            .with_ordering(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::fixtures::{ids, shared, station};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_is_timetable_order() {
        let trains = station();
        let mut rng = SmallRng::seed_from_u64(1);
        let scenario = DefaultTimetable.build(&trains, &mut rng).unwrap();
        assert_eq!(scenario.id, "DEFAULT");
        assert_eq!(
            ids(&scenario),
            vec!["12009", "59441", "12951", "90001", "90002", "22209"]
        );
        assert!(scenario.verify_against(&trains).is_ok());
    }

    #[test]
    fn test_ml_optimized_key_order() {
        let trains = shared(vec![
            TrainRecord::new("T1").with_type("Express").with_delay(10.0).with_distance(100.0),
            TrainRecord::new("T2").with_type("Express").with_delay(5.0).with_distance(200.0),
            TrainRecord::new("T3").with_type("EMU").with_delay(1.0).with_distance(50.0),
        ]);
        let mut rng = SmallRng::seed_from_u64(1);
        let scenario = MlOptimized.build(&trains, &mut rng).unwrap();
        assert_eq!(ids(&scenario), vec!["T2", "T1", "T3"]);
        assert_eq!(scenario.entries[0].order, 1);
    }

    #[test]
    fn test_ml_optimized_distance_then_arrival() {
        let trains = shared(vec![
            TrainRecord::new("near_late").with_delay(3.0).with_distance(50.0).with_arrival(9, 0),
            TrainRecord::new("far").with_delay(3.0).with_distance(500.0).with_arrival(10, 0),
            TrainRecord::new("near_early").with_delay(3.0).with_distance(50.0).with_arrival(7, 0),
        ]);
        let mut rng = SmallRng::seed_from_u64(1);
        let scenario = MlOptimized.build(&trains, &mut rng).unwrap();
        assert_eq!(ids(&scenario), vec!["far", "near_early", "near_late"]);
    }

    #[test]
    fn test_ml_optimized_station() {
        let trains = station();
        let mut rng = SmallRng::seed_from_u64(1);
        let scenario = MlOptimized.build(&trains, &mut rng).unwrap();
        // express: 12009(1.0), 12951(6.0); other: 22209; local: 90002, 90001, 59441
        assert_eq!(
            ids(&scenario),
            vec!["12009", "12951", "22209", "90002", "90001", "59441"]
        );
    }

    #[test]
    fn test_empty_input() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(DefaultTimetable.build(&[], &mut rng).unwrap().is_empty());
        assert!(MlOptimized.build(&[], &mut rng).unwrap().is_empty());
    }
}
