//! Platform-driven heuristics.
//!
//! Reassignment only ever targets platforms in the configured pool. A
//! train whose current platform lies outside the pool (e.g. 9 with pool
//! 1–6) can still be moved away from it.

use rand::prelude::IndexedRandom;
use rand::RngCore;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::{fresh_entries, ScenarioHeuristic};
use crate::dispatching::{rules, RuleEngine};
use crate::error::{DispatchError, Result};
use crate::models::{PlatformOccupant, Scenario, TrainRecord};

fn platform_then_delay() -> RuleEngine {
    RuleEngine::new()
        .with_rule(rules::Platform)
        .with_rule(rules::LeastDelay)
}

fn check_pool(pool: &[u32]) -> Result<()> {
    if pool.is_empty() {
        return Err(DispatchError::InvalidConfig("platform pool is empty".into()));
    }
    Ok(())
}

/// Drops repeated pool entries, keeping first occurrences in order.
fn distinct_pool(pool: Vec<u32>) -> Vec<u32> {
    let mut seen = HashSet::new();
    pool.into_iter().filter(|p| seen.insert(*p)).collect()
}

/// Trains grouped by platform, each group by delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformGrouped;

impl ScenarioHeuristic for PlatformGrouped {
    fn scenario_id(&self) -> String {
        "PLATFORM_GROUPED".to_string()
    }

    fn build(&self, trains: &[Arc<TrainRecord>], _rng: &mut dyn RngCore) -> Result<Scenario> {
        let mut entries = fresh_entries(trains);
        platform_then_delay().sort(&mut entries);

        Ok(Scenario::new(self.scenario_id(), "Platform Grouped Schedule")
            .with_description("Trains grouped by platform to minimize conflicts")
            .with_use_case("When platform conflicts are causing major delays")
            .with_ordering(entries))
    }
}

/// Moves trains off crowded platforms, then orders by delay.
///
/// # Algorithm
/// Count occupants per platform (all platforms, pool or not). Walking the
/// trains in input order, find the least-occupied pool platform (lowest
/// number on ties). Move the train there only if that platform's count is
/// below the train's current platform count minus one, updating both
/// counts.
#[derive(Debug, Clone)]
pub struct PlatformBalanced {
    pool: Vec<u32>,
}

impl PlatformBalanced {
    pub fn new(pool: Vec<u32>) -> Self {
        Self {
            pool: distinct_pool(pool),
        }
    }
}

impl Default for PlatformBalanced {
    fn default() -> Self {
        Self::new((1..=6).collect())
    }
}

impl ScenarioHeuristic for PlatformBalanced {
    fn scenario_id(&self) -> String {
        "PLATFORM_BALANCED".to_string()
    }

    fn build(&self, trains: &[Arc<TrainRecord>], _rng: &mut dyn RngCore) -> Result<Scenario> {
        check_pool(&self.pool)?;
        let mut entries = fresh_entries(trains);

        let mut counts: HashMap<u32, usize> = HashMap::new();
        for entry in &entries {
            *counts.entry(entry.platform()).or_insert(0) += 1;
        }

        for entry in entries.iter_mut() {
            let current = entry.platform();
            let Some(&target) = self
                .pool
                .iter()
                .min_by_key(|p| counts.get(*p).copied().unwrap_or(0))
            else {
                continue;
            };

            let target_load = counts.get(&target).copied().unwrap_or(0);
            let current_load = counts.get(&current).copied().unwrap_or(0);
            if target_load + 1 < current_load {
                entry.reassign_platform(target);
                entry.annotations.platform_changed = true;
                if let Some(c) = counts.get_mut(&current) {
                    *c -= 1;
                }
                *counts.entry(target).or_insert(0) += 1;
            }
        }

        RuleEngine::new().with_rule(rules::LeastDelay).sort(&mut entries);

        Ok(Scenario::new(self.scenario_id(), "Platform Load Balanced")
            .with_description("Trains redistributed across platforms for load balancing")
            .with_use_case("When certain platforms are overcrowded")
            .with_ordering(entries))
    }
}

/// Sends every train to a uniformly chosen other platform from the pool.
///
/// Randomized: the result depends on the random source handed to `build`.
#[derive(Debug, Clone)]
pub struct AlternativePlatforms {
    pool: Vec<u32>,
}

impl AlternativePlatforms {
    /// Repeated pool entries count once, so the choice stays uniform.
    pub fn new(pool: Vec<u32>) -> Self {
        Self {
            pool: distinct_pool(pool),
        }
    }
}

impl Default for AlternativePlatforms {
    fn default() -> Self {
        Self::new((1..=6).collect())
    }
}

impl ScenarioHeuristic for AlternativePlatforms {
    fn scenario_id(&self) -> String {
        "ALTERNATIVE_PLATFORMS".to_string()
    }

    fn build(&self, trains: &[Arc<TrainRecord>], rng: &mut dyn RngCore) -> Result<Scenario> {
        check_pool(&self.pool)?;
        let mut entries = fresh_entries(trains);

        for entry in entries.iter_mut() {
            let current = entry.platform();
            let alternatives: Vec<u32> = self
                .pool
                .iter()
                .copied()
                .filter(|&p| p != current)
                .collect();

            if let Some(&choice) = alternatives.choose(&mut *rng) {
                entry.reassign_platform(choice);
                entry.annotations.alternative_platform = Some(choice);
                entry.annotations.platform_reassigned = true;
            }
        }

        platform_then_delay().sort(&mut entries);

        Ok(Scenario::new(self.scenario_id(), "Alternative Platform Assignment")
            .with_description("Trains reassigned to alternative platforms")
            .with_use_case("When original platforms have maintenance or issues")
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
    fn test_platform_grouped() {
        let trains = station();
        let mut rng = SmallRng::seed_from_u64(1);
        let scenario = PlatformGrouped.build(&trains, &mut rng).unwrap();
        assert_eq!(
            ids(&scenario),
            vec!["12951", "59441", "22209", "12009", "90001", "90002"]
        );
    }

    #[test]
    fn test_platform_balanced_moves_from_crowded_platform() {
        let trains = station();
        let mut rng = SmallRng::seed_from_u64(1);
        let scenario = PlatformBalanced::default().build(&trains, &mut rng).unwrap();

        let rajdhani = scenario.entry_for("12951").unwrap();
        assert_eq!(rajdhani.platform(), 4);
        assert!(rajdhani.annotations.platform_changed);
        assert_eq!(rajdhani.annotations.original_platform, Some(1));

        let passenger = scenario.entry_for("59441").unwrap();
        assert_eq!(passenger.platform(), 5);

        // Platform 1 is down to one occupant, nothing else moves
        let duronto = scenario.entry_for("22209").unwrap();
        assert_eq!(duronto.platform(), 1);
        assert!(!duronto.annotations.platform_changed);
        assert_eq!(scenario.entry_for("90002").unwrap().platform(), 9);

        assert_eq!(
            ids(&scenario),
            vec!["90002", "12009", "90001", "12951", "59441", "22209"]
        );
        // Shared records untouched
        assert_eq!(trains[0].platform_no, 1);
    }

    #[test]
    fn test_platform_balanced_moves_off_pool_platform() {
        let trains = shared(vec![
            TrainRecord::new("A").with_platform(9),
            TrainRecord::new("B").with_platform(9),
            TrainRecord::new("C").with_platform(9),
        ]);
        let mut rng = SmallRng::seed_from_u64(1);
        let scenario = PlatformBalanced::new(vec![1, 2])
            .build(&trains, &mut rng)
            .unwrap();
        assert_eq!(scenario.entry_for("A").unwrap().platform(), 1);
        assert_eq!(scenario.entry_for("B").unwrap().platform(), 2);
        // counts now 9:1, 1:1, 2:1
        assert_eq!(scenario.entry_for("C").unwrap().platform(), 9);
    }

    #[test]
    fn test_alternative_platforms_never_keep_platform() {
        let trains = station();
        let mut rng = SmallRng::seed_from_u64(42);
        let scenario = AlternativePlatforms::default()
            .build(&trains, &mut rng)
            .unwrap();

        for entry in &scenario.entries {
            let original = entry.train().platform_no;
            assert_ne!(entry.platform(), original);
            assert!((1..=6).contains(&entry.platform()));
            assert!(entry.annotations.platform_reassigned);
            assert_eq!(entry.annotations.original_platform, Some(original));
            assert_eq!(entry.annotations.alternative_platform, Some(entry.platform()));
        }

        let keys: Vec<(u32, f64)> = scenario
            .entries
            .iter()
            .map(|e| (e.platform(), e.predicted_delay()))
            .collect();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        assert!(scenario.verify_against(&trains).is_ok());
    }

    #[test]
    fn test_alternative_platforms_seeded_is_reproducible() {
        let trains = station();
        let a = AlternativePlatforms::default()
            .build(&trains, &mut SmallRng::seed_from_u64(7))
            .unwrap();
        let b = AlternativePlatforms::default()
            .build(&trains, &mut SmallRng::seed_from_u64(7))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_alternative_platforms_two_platform_pool() {
        let trains = shared(vec![
            TrainRecord::new("A").with_platform(1).with_delay(3.0),
            TrainRecord::new("B").with_platform(2).with_delay(1.0),
        ]);
        let mut rng = SmallRng::seed_from_u64(3);
        let scenario = AlternativePlatforms::new(vec![1, 2])
            .build(&trains, &mut rng)
            .unwrap();
        assert_eq!(scenario.entry_for("A").unwrap().platform(), 2);
        assert_eq!(scenario.entry_for("B").unwrap().platform(), 1);
        assert_eq!(ids(&scenario), vec!["B", "A"]);
    }

    #[test]
    fn test_single_platform_pool_leaves_train_in_place() {
        let trains = shared(vec![TrainRecord::new("A").with_platform(1)]);
        let mut rng = SmallRng::seed_from_u64(3);
        let scenario = AlternativePlatforms::new(vec![1])
            .build(&trains, &mut rng)
            .unwrap();
        let entry = scenario.entry_for("A").unwrap();
        assert_eq!(entry.platform(), 1);
        assert!(!entry.annotations.platform_reassigned);
    }

    #[test]
    fn test_repeated_pool_entries_choose_uniformly() {
        let trains = shared(vec![TrainRecord::new("A").with_platform(3)]);
        let heuristic = AlternativePlatforms::new(vec![1, 1, 1, 2]);
        let mut rng = SmallRng::seed_from_u64(17);

        let runs = 2000;
        let mut on_one = 0;
        for _ in 0..runs {
            let scenario = heuristic.build(&trains, &mut rng).unwrap();
            match scenario.entry_for("A").unwrap().platform() {
                1 => on_one += 1,
                2 => {}
                other => panic!("unexpected platform {other}"),
            }
        }
        // Expected 1000 for a fair choice between 1 and 2
        assert!((850..=1150).contains(&on_one), "platform 1 chosen {on_one} times");
    }

    #[test]
    fn test_distinct_pool_keeps_first_occurrence() {
        assert_eq!(distinct_pool(vec![3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let trains = station();
        let mut rng = SmallRng::seed_from_u64(3);
        assert!(AlternativePlatforms::new(vec![]).build(&trains, &mut rng).is_err());
        assert!(PlatformBalanced::new(vec![]).build(&trains, &mut rng).is_err());
    }
}
