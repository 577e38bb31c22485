//! Class-block heuristics: one priority class first, everyone else by delay.

use rand::RngCore;
use std::sync::Arc;

use super::{fresh_entries, ScenarioHeuristic};
use crate::dispatching::{rules, RuleEngine};
use crate::error::Result;
use crate::models::{Priority, Scenario, TrainRecord};

/// Puts every train of one class first (input order kept inside the
/// block), then the rest sorted by predicted delay.
#[derive(Debug, Clone, Copy)]
pub struct PriorityFirst {
    block: Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Express,
    Local,
}

impl Block {
    fn class(self) -> Priority {
        match self {
            Block::Express => Priority::Express,
            Block::Local => Priority::Local,
        }
    }
}

impl PriorityFirst {
    /// Express and superfast trains first.
    pub fn express() -> Self {
        Self {
            block: Block::Express,
        }
    }

    /// Passenger and local trains first.
    pub fn local() -> Self {
        Self { block: Block::Local }
    }

    fn labels(&self) -> (&'static str, &'static str, &'static str) {
        match self.block {
            Block::Express => (
                "Express Trains Priority",
                "All express trains scheduled first, then others by delay",
                "When express train punctuality is critical",
            ),
            Block::Local => (
                "Local Trains Priority",
                "Local trains scheduled first to clear local traffic",
                "During peak hours to manage local commuter traffic",
            ),
        }
    }
}

impl ScenarioHeuristic for PriorityFirst {
    fn scenario_id(&self) -> String {
        match self.block {
            Block::Express => "EXPRESS_FIRST",
            Block::Local => "LOCAL_FIRST",
        }
        .to_string()
    }

    fn build(&self, trains: &[Arc<TrainRecord>], _rng: &mut dyn RngCore) -> Result<Scenario> {
        let (mut block, mut rest): (Vec<_>, Vec<_>) = fresh_entries(trains)
            .into_iter()
            .partition(|e| e.priority() == self.block.class());

        RuleEngine::new().with_rule(rules::LeastDelay).sort(&mut rest);
        block.append(&mut rest);

        let (name, description, use_case) = self.labels();
        Ok(Scenario::new(self.scenario_id(), name)
            .with_description(description)
            .with_use_case(use_case)
            .with_ordering(block))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::fixtures::{ids, station};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_express_first() {
        let trains = station();
        let mut rng = SmallRng::seed_from_u64(1);
        let scenario = PriorityFirst::express().build(&trains, &mut rng).unwrap();
        assert_eq!(scenario.id, "EXPRESS_FIRST");
        // block keeps input order (12951 before 12009), rest by delay
        assert_eq!(
            ids(&scenario),
            vec!["12951", "12009", "90002", "90001", "59441", "22209"]
        );
        assert!(scenario.verify_against(&trains).is_ok());
    }

    #[test]
    fn test_local_first() {
        let trains = station();
        let mut rng = SmallRng::seed_from_u64(1);
        let scenario = PriorityFirst::local().build(&trains, &mut rng).unwrap();
        assert_eq!(scenario.id, "LOCAL_FIRST");
        assert_eq!(
            ids(&scenario),
            vec!["59441", "90001", "90002", "12009", "12951", "22209"]
        );
    }

    #[test]
    fn test_only_two_class_blocks() {
        let ids: Vec<String> = [PriorityFirst::express(), PriorityFirst::local()]
            .iter()
            .map(|h| h.scenario_id())
            .collect();
        assert_eq!(ids, vec!["EXPRESS_FIRST", "LOCAL_FIRST"]);
        assert_eq!(Block::Express.class(), Priority::Express);
        assert_eq!(Block::Local.class(), Priority::Local);
    }

    #[test]
    fn test_no_block_members() {
        let trains = station();
        let only_other: Vec<_> = trains
            .iter()
            .filter(|t| t.priority == Priority::Other)
            .cloned()
            .collect();
        let mut rng = SmallRng::seed_from_u64(1);
        let scenario = PriorityFirst::express().build(&only_other, &mut rng).unwrap();
        assert_eq!(ids(&scenario), vec!["22209"]);
    }
}
