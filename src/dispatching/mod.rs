//! Ordering rules and rule engine for dispatch sequencing.
//!
//! Each scenario heuristic is a chain of sort keys (e.g. priority, then
//! predicted delay, then distance descending). Sort keys are expressed as
//! [`OrderingRule`]s and composed by a [`RuleEngine`] that applies them in
//! sequence, falling through to the next rule only on ties.
//!
//! # Usage
//!
//! ```
//! use u_dispatch::dispatching::{rules, RuleEngine};
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::PriorityClass)
//!     .with_rule(rules::LeastDelay)
//!     .with_rule(rules::LongestDistance)
//!     .with_rule(rules::ScheduledArrival);
//! // engine.sort(&mut entries);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod engine;
pub mod rules;

pub use engine::RuleEngine;

use crate::models::ScenarioEntry;
use std::fmt::Debug;

/// Score returned by an ordering rule.
///
/// Lower scores = dispatched earlier.
pub type RuleScore = f64;

/// A sort key over scenario entries.
///
/// # Score Convention
/// **Lower score = earlier dispatch.** Descending keys negate their value.
/// Rules read the values in effect for the scenario (overridden platform or
/// delay), not the base record.
pub trait OrderingRule: Send + Sync + Debug {
    /// Rule name (e.g., "DELAY").
    fn name(&self) -> &'static str;

    /// Evaluates an entry. Lower = earlier.
    fn evaluate(&self, entry: &ScenarioEntry) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
