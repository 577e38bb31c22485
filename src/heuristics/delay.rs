//! Delay-ordered heuristics.

use rand::RngCore;
use std::sync::Arc;

use super::{fresh_entries, ScenarioHeuristic};
use crate::dispatching::{rules, RuleEngine};
use crate::error::Result;
use crate::models::{Scenario, TrainRecord};

/// Lowest predicted delay first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinDelayFirst;

impl ScenarioHeuristic for MinDelayFirst {
    fn scenario_id(&self) -> String {
        "MIN_DELAY_FIRST".to_string()
    }

    fn build(&self, trains: &[Arc<TrainRecord>], _rng: &mut dyn RngCore) -> Result<Scenario> {
        let mut entries = fresh_entries(trains);
        RuleEngine::new().with_rule(rules::LeastDelay).sort(&mut entries);

        Ok(Scenario::new(self.scenario_id(), "Minimum Delay First")
            .with_description("Trains with lowest predicted delays scheduled first")
            .with_use_case("When overall punctuality is the main concern")
            .with_ordering(entries))
    }
}

/// Highest predicted delay first, to clear a backlog.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxDelayFirst;

impl ScenarioHeuristic for MaxDelayFirst {
    fn scenario_id(&self) -> String {
        "MAX_DELAY_FIRST".to_string()
    }

    fn build(&self, trains: &[Arc<TrainRecord>], _rng: &mut dyn RngCore) -> Result<Scenario> {
        let mut entries = fresh_entries(trains);
        RuleEngine::new().with_rule(rules::MostDelay).sort(&mut entries);

        Ok(Scenario::new(self.scenario_id(), "Maximum Delay First")
            .with_description("Trains with highest delays scheduled first to clear backlog")
            .with_use_case("When clearing delayed trains is priority")
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
    fn test_min_delay_first() {
        let trains = station();
        let mut rng = SmallRng::seed_from_u64(1);
        let scenario = MinDelayFirst.build(&trains, &mut rng).unwrap();
        assert_eq!(
            ids(&scenario),
            vec!["90002", "12009", "90001", "12951", "59441", "22209"]
        );
    }

    #[test]
    fn test_max_delay_first() {
        let trains = station();
        let mut rng = SmallRng::seed_from_u64(1);
        let scenario = MaxDelayFirst.build(&trains, &mut rng).unwrap();
        assert_eq!(
            ids(&scenario),
            vec!["22209", "59441", "12951", "90001", "12009", "90002"]
        );
    }

    #[test]
    fn test_equal_delays_keep_input_order() {
        let trains = shared(vec![
            TrainRecord::new("B").with_delay(4.0),
            TrainRecord::new("A").with_delay(4.0),
        ]);
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(ids(&MinDelayFirst.build(&trains, &mut rng).unwrap()), vec!["B", "A"]);
        assert_eq!(ids(&MaxDelayFirst.build(&trains, &mut rng).unwrap()), vec!["B", "A"]);
    }
}
