//! "What if this train goes first" heuristic.

use rand::RngCore;
use std::sync::Arc;

use super::{fresh_entries, ScenarioHeuristic};
use crate::dispatching::{rules, RuleEngine};
use crate::error::{DispatchError, Result};
use crate::models::{Scenario, TrainRecord};

/// Pins one train at position 1, the rest by predicted delay.
#[derive(Debug, Clone)]
pub struct ForcedFirst {
    train_no: String,
}

impl ForcedFirst {
    pub fn new(train_no: impl Into<String>) -> Self {
        Self {
            train_no: train_no.into(),
        }
    }

    pub fn train_no(&self) -> &str {
        &self.train_no
    }
}

impl ScenarioHeuristic for ForcedFirst {
    fn scenario_id(&self) -> String {
        format!("TRAIN_{}_FIRST", self.train_no)
    }

    fn build(&self, trains: &[Arc<TrainRecord>], _rng: &mut dyn RngCore) -> Result<Scenario> {
        let mut rest = fresh_entries(trains);
        let position = rest
            .iter()
            .position(|e| e.train_no() == self.train_no)
            .ok_or_else(|| DispatchError::UnknownTrain(self.train_no.clone()))?;

        let mut target = rest.remove(position);
        target.annotations.forced_first = true;
        let train_name = target.record().train_name.clone();

        RuleEngine::new().with_rule(rules::LeastDelay).sort(&mut rest);
        let mut entries = Vec::with_capacity(trains.len());
        entries.push(target);
        entries.append(&mut rest);

        let no = &self.train_no;
        Ok(Scenario::new(self.scenario_id(), format!("Train {no} Goes First"))
            .with_description(format!(
                "What if Train {no} ({train_name}) is prioritized first"
            ))
            .with_use_case(format!(
                "Emergency priority for Train {no} or specific operational needs"
            ))
            .with_ordering(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::fixtures::{ids, station};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_forced_train_is_first_regardless_of_delay() {
        let trains = station();
        let mut rng = SmallRng::seed_from_u64(1);
        // Highest delay, "Other" class
        let scenario = ForcedFirst::new("22209").build(&trains, &mut rng).unwrap();

        assert_eq!(scenario.id, "TRAIN_22209_FIRST");
        assert_eq!(scenario.name, "Train 22209 Goes First");
        assert!(scenario.description.contains("Duronto"));
        assert_eq!(
            ids(&scenario),
            vec!["22209", "90002", "12009", "90001", "12951", "59441"]
        );
        let first = &scenario.entries[0];
        assert_eq!(first.order, 1);
        assert!(first.annotations.forced_first);
        assert!(scenario.entries[1..]
            .iter()
            .all(|e| !e.annotations.forced_first));
        assert!(scenario.verify_against(&trains).is_ok());
    }

    #[test]
    fn test_unknown_train() {
        let trains = station();
        let mut rng = SmallRng::seed_from_u64(1);
        let err = ForcedFirst::new("00000").build(&trains, &mut rng).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownTrain(no) if no == "00000"));
    }
}
