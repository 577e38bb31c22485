//! Scenario generation, scoring and ranking.
//!
//! # Pipeline
//!
//! ```text
//! trains ─► ConflictDetector (advisory report)
//!        └► ScenarioCatalog ─► ScenarioMetrics ─► rank_scenarios
//! ```
//!
//! [`GreedyDispatcher`] is the single-plan shortcut: one multi-criteria
//! ordering plus the conflict report, without a catalog.
//!
//! # KPI
//!
//! [`ScenarioMetrics`] computes delay statistics, an occupancy-based
//! platform-conflict count, express positioning and the two derived
//! scores that feed the weighted overall score.

mod catalog;
mod conflicts;
mod greedy;
mod kpi;
mod ranking;

pub use catalog::{ScenarioCatalog, FIXED_HEURISTICS};
pub use conflicts::ConflictDetector;
pub use greedy::{DispatchPlan, GreedyDispatcher, PlanSummary, PlannedTrain};
pub use kpi::ScenarioMetrics;
pub use ranking::{overall_score, rank_scenarios, ScenarioRanking};
