//! Alternative-ordering heuristics ("what-if" scenarios).
//!
//! Each heuristic maps the full train set to one [`Scenario`]: every train
//! exactly once, orders `1..=N`. Heuristics start from fresh overlay entries
//! over the shared records, so nothing one heuristic changes (platform,
//! delay) is visible to another.
//!
//! | Scenario id | Ordering |
//! |-------------|----------|
//! | `DEFAULT` | scheduled arrival |
//! | `ML_OPTIMIZED` | priority, delay, distance desc, scheduled arrival |
//! | `EXPRESS_FIRST` / `LOCAL_FIRST` | class block, then rest by delay |
//! | `MIN_DELAY_FIRST` / `MAX_DELAY_FIRST` | delay asc / desc |
//! | `PLATFORM_GROUPED` | platform, delay |
//! | `PLATFORM_BALANCED` | rebalance platforms, then delay |
//! | `TRAIN_{no}_FIRST` | pinned train, then rest by delay |
//! | `ROUTE_SPACED` | space same-route trains, then adjusted delay |
//! | `ALTERNATIVE_PLATFORMS` | random other platform, then platform, delay |
//!
//! Only `ALTERNATIVE_PLATFORMS` consumes randomness; it draws from the
//! random source passed to [`ScenarioHeuristic::build`].

mod delay;
mod forced;
mod platform;
mod priority;
mod route;
mod timetable;

pub use delay::{MaxDelayFirst, MinDelayFirst};
pub use forced::ForcedFirst;
pub use platform::{AlternativePlatforms, PlatformBalanced, PlatformGrouped};
pub use priority::PriorityFirst;
pub use route::RouteSpaced;
pub use timetable::{DefaultTimetable, MlOptimized};

use rand::RngCore;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Scenario, ScenarioEntry, TrainRecord};

/// A scenario-generating heuristic.
pub trait ScenarioHeuristic: Send + Sync + Debug {
    /// Stable id of the scenario this heuristic produces.
    fn scenario_id(&self) -> String;

    /// Builds the scenario for `trains`.
    fn build(&self, trains: &[Arc<TrainRecord>], rng: &mut dyn RngCore) -> Result<Scenario>;
}

/// Fresh, unordered entries in input order.
pub(crate) fn fresh_entries(trains: &[Arc<TrainRecord>]) -> Vec<ScenarioEntry> {
    trains.iter().cloned().map(ScenarioEntry::new).collect()
}
