//! Scenario catalog builder.
//!
//! Runs every heuristic of the catalog over the same shared train set and
//! collects the scenarios in catalog order. The standard catalog for N
//! trains holds 10 + N heuristics:
//!
//! `DEFAULT`, `ML_OPTIMIZED`, `EXPRESS_FIRST`, `LOCAL_FIRST`,
//! `MIN_DELAY_FIRST`, `MAX_DELAY_FIRST`, `PLATFORM_GROUPED`,
//! `PLATFORM_BALANCED`, one `TRAIN_{no}_FIRST` per train (input order),
//! `ROUTE_SPACED`, `ALTERNATIVE_PLATFORMS`.
//!
//! Any heuristic failure, or a scenario that is not a permutation of the
//! input, fails the whole build; no partial catalog is returned.

use std::fmt;
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::heuristics::{
    AlternativePlatforms, DefaultTimetable, ForcedFirst, MaxDelayFirst, MinDelayFirst,
    MlOptimized, PlatformBalanced, PlatformGrouped, PriorityFirst, RouteSpaced,
    ScenarioHeuristic,
};
use crate::models::{Scenario, TrainRecord};
use crate::observer::DispatchObserver;

/// Heuristics in the standard catalog besides the per-train ones.
pub const FIXED_HEURISTICS: usize = 10;

/// Per-heuristic random source derived from one base seed.
fn job_rng(base_seed: u64, j: usize) -> SmallRng {
    let s = base_seed ^ (j as u64).rotate_left(17) ^ 0x9E37_79B1_85EB_CA87u64;
    SmallRng::seed_from_u64(s)
}

/// An ordered list of heuristics.
#[derive(Default)]
pub struct ScenarioCatalog {
    heuristics: Vec<Box<dyn ScenarioHeuristic>>,
}

impl ScenarioCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard catalog for `trains` under `config`.
    pub fn standard(trains: &[Arc<TrainRecord>], config: &EngineConfig) -> Self {
        let mut catalog = Self::new()
            .with_heuristic(DefaultTimetable)
            .with_heuristic(MlOptimized)
            .with_heuristic(PriorityFirst::express())
            .with_heuristic(PriorityFirst::local())
            .with_heuristic(MinDelayFirst)
            .with_heuristic(MaxDelayFirst)
            .with_heuristic(PlatformGrouped)
            .with_heuristic(PlatformBalanced::new(config.platform_pool.clone()));

        for train in trains {
            catalog.push(ForcedFirst::new(train.train_no.clone()));
        }

        catalog
            .with_heuristic(RouteSpaced::new(config.route_spacing_minutes))
            .with_heuristic(AlternativePlatforms::new(config.platform_pool.clone()))
    }

    /// Appends a heuristic.
    pub fn with_heuristic<H: ScenarioHeuristic + 'static>(mut self, heuristic: H) -> Self {
        self.push(heuristic);
        self
    }

    pub fn push<H: ScenarioHeuristic + 'static>(&mut self, heuristic: H) {
        self.heuristics.push(Box::new(heuristic));
    }

    pub fn len(&self) -> usize {
        self.heuristics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heuristics.is_empty()
    }

    /// Scenario ids in catalog order.
    pub fn scenario_ids(&self) -> Vec<String> {
        self.heuristics.iter().map(|h| h.scenario_id()).collect()
    }

    /// Builds every scenario on the calling thread.
    ///
    /// Each heuristic draws from its own generator seeded from `rng`, so
    /// this yields the same catalog as [`build_parallel`](Self::build_parallel)
    /// for the same `rng` state.
    pub fn build(
        &self,
        trains: &[Arc<TrainRecord>],
        rng: &mut dyn RngCore,
        observer: &dyn DispatchObserver,
    ) -> Result<Vec<Scenario>> {
        observer.on_catalog_start(trains.len());
        let base_seed = rng.next_u64();

        let scenarios = self
            .heuristics
            .iter()
            .enumerate()
            .map(|(j, h)| run_one(h.as_ref(), trains, &mut job_rng(base_seed, j), observer))
            .collect::<Result<Vec<_>>>()?;

        observer.on_catalog_end(scenarios.len());
        Ok(scenarios)
    }

    /// Builds every scenario on the rayon pool, preserving catalog order.
    pub fn build_parallel(
        &self,
        trains: &[Arc<TrainRecord>],
        rng: &mut dyn RngCore,
        observer: &dyn DispatchObserver,
    ) -> Result<Vec<Scenario>> {
        observer.on_catalog_start(trains.len());
        let base_seed = rng.next_u64();

        let scenarios = (0..self.heuristics.len())
            .into_par_iter()
            .map(|j| {
                let mut rng = job_rng(base_seed, j);
                run_one(self.heuristics[j].as_ref(), trains, &mut rng, observer)
            })
            .collect::<Result<Vec<_>>>()?;

        observer.on_catalog_end(scenarios.len());
        Ok(scenarios)
    }
}

fn run_one(
    heuristic: &dyn ScenarioHeuristic,
    trains: &[Arc<TrainRecord>],
    rng: &mut dyn RngCore,
    observer: &dyn DispatchObserver,
) -> Result<Scenario> {
    let id = heuristic.scenario_id();
    observer.on_heuristic_start(&id);

    let scenario = heuristic.build(trains, rng)?;
    scenario.verify_against(trains)?;

    observer.on_heuristic_end(&id, scenario.len());
    Ok(scenario)
}

impl fmt::Debug for ScenarioCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioCatalog")
            .field("heuristics", &self.scenario_ids())
            .finish()
    }
}
