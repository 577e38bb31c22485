//! Dispatch scenario engine for railway control stations.
//!
//! Generates a menu of candidate train orderings ("what-if" scenarios) for
//! trains competing for a small set of platforms, scores every scenario and
//! ranks them so an operator can pick the one that fits current needs.
//! This is not an optimizer: each scenario comes from a simple,
//! deterministic or seeded-random heuristic.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TrainRecord`, `Priority`, `ClockTime`,
//!   `ActualTiming`, `Scenario`, `ScenarioEntry`, `ConflictRecord`
//! - **`dispatching`**: Ordering rules and the lexicographic `RuleEngine`
//! - **`heuristics`**: One `ScenarioHeuristic` per scenario family
//! - **`scheduler`**: Conflict detection, catalog building, KPIs, ranking,
//!   and the single-plan greedy dispatcher
//! - **`validation`**: Input integrity checks (duplicate numbers, platforms, times)
//! - **`prediction`**: Delay-predictor seam with fallback
//! - **`observer`**: Injectable diagnostics (no-op, `tracing`, fan-out)
//! - **`report`**: Serializable control-station report and leaderboard
//! - **`config`**: Engine constants and ranking weights
//! - **`station`**: `ControlStation` facade running the whole pipeline
//!
//! # Example
//!
//! ```
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use u_dispatch::config::EngineConfig;
//! use u_dispatch::models::TrainRecord;
//! use u_dispatch::station::ControlStation;
//!
//! let trains = vec![
//!     TrainRecord::new("12951").with_type("Superfast").with_arrival(8, 0).with_delay(6.0),
//!     TrainRecord::new("59441").with_type("Passenger").with_arrival(7, 30).with_delay(12.5),
//! ];
//! let station = ControlStation::new(EngineConfig::default()).unwrap();
//! let run = station.run_with_rng(&trains, &mut SmallRng::seed_from_u64(7)).unwrap();
//!
//! // 10 fixed scenarios plus one forced-first scenario per train
//! assert_eq!(run.report.scenario_rankings.len(), 12);
//! assert_eq!(run.report.scenario_rankings[0].rank, 1);
//! ```
//!
//! # References
//!
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

pub mod config;
pub mod dispatching;
pub mod error;
pub mod heuristics;
pub mod models;
pub mod observer;
pub mod prediction;
pub mod report;
pub mod scheduler;
pub mod station;
pub mod validation;

pub use error::{DispatchError, Result};
