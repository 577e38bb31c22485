//! Control-station facade.
//!
//! Wires the engine stages together for one run:
//!
//! 1. validate the train records,
//! 2. detect platform conflicts on the input assignment,
//! 3. build the standard scenario catalog (serially or on the rayon pool),
//! 4. score and rank every scenario,
//! 5. package the report and leaderboard.

use std::sync::Arc;

use rand::RngCore;

use crate::config::EngineConfig;
use crate::error::{DispatchError, Result};
use crate::models::{ConflictRecord, TrainRecord};
use crate::observer::{DispatchObserver, NullObserver};
use crate::prediction::{apply_predictions, DelayPredictor};
use crate::report::{ControlStationReport, Leaderboard};
use crate::scheduler::{
    rank_scenarios, ConflictDetector, DispatchPlan, GreedyDispatcher, ScenarioCatalog,
};
use crate::validation::validate_trains;

/// Output of one [`ControlStation::run_with_rng`].
#[derive(Debug, Clone)]
pub struct StationRun {
    /// Conflicts on the input platform assignment.
    pub conflicts: Vec<ConflictRecord>,
    pub report: ControlStationReport,
    pub leaderboard: Leaderboard,
}

/// Runs the scenario engine with one configuration and observer.
#[derive(Debug, Clone)]
pub struct ControlStation {
    config: EngineConfig,
    observer: Arc<dyn DispatchObserver>,
}

impl ControlStation {
    /// Creates a station, rejecting an unusable configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            observer: Arc::new(NullObserver),
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn DispatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fills in predicted delays, falling back to the configured delay.
    pub fn predict<P: DelayPredictor + ?Sized>(
        &self,
        trains: &[TrainRecord],
        predictor: &P,
    ) -> Vec<TrainRecord> {
        apply_predictions(
            trains,
            predictor,
            self.config.fallback_delay_minutes,
            self.observer.as_ref(),
        )
    }

    /// Runs with the thread-local random source.
    pub fn run(&self, trains: &[TrainRecord]) -> Result<StationRun> {
        self.run_with_rng(trains, &mut rand::rng())
    }

    /// Runs with an explicit random source.
    pub fn run_with_rng(
        &self,
        trains: &[TrainRecord],
        rng: &mut dyn RngCore,
    ) -> Result<StationRun> {
        let shared = self.prepare(trains)?;
        let observer = self.observer.as_ref();

        let conflicts = ConflictDetector::from_config(&self.config).detect(trains, observer);

        let catalog = ScenarioCatalog::standard(&shared, &self.config);
        let scenarios = if self.config.parallel {
            catalog.build_parallel(&shared, rng, observer)?
        } else {
            catalog.build(&shared, rng, observer)?
        };

        let rankings = rank_scenarios(scenarios, &self.config.weights, observer);
        let report = ControlStationReport::new(rankings, &shared);
        let leaderboard = report.leaderboard(self.config.leaderboard_size);

        Ok(StationRun {
            conflicts,
            report,
            leaderboard,
        })
    }

    /// Produces the single greedy plan.
    pub fn dispatch(&self, trains: &[TrainRecord]) -> Result<DispatchPlan> {
        let shared = self.prepare(trains)?;
        Ok(GreedyDispatcher::from_config(&self.config).dispatch(&shared, self.observer.as_ref()))
    }

    fn prepare(&self, trains: &[TrainRecord]) -> Result<Vec<Arc<TrainRecord>>> {
        validate_trains(trains).map_err(DispatchError::Validation)?;
        Ok(trains.iter().cloned().map(Arc::new).collect())
    }
}
