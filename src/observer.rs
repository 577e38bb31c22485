//! Diagnostic observers.
//!
//! The engine reports progress through an injected [`DispatchObserver`]
//! instead of a global logger. All methods default to no-ops, take `&self`
//! and the trait is `Send + Sync`, so one observer can be shared by the
//! worker pool that builds scenarios in parallel.

use std::fmt;

use crate::models::ConflictRecord;

/// Observer for engine lifecycle events.
pub trait DispatchObserver: Send + Sync {
    /// A short identifier for logging and diagnostics.
    fn name(&self) -> &str {
        "DispatchObserver"
    }

    fn on_catalog_start(&self, _train_count: usize) {}
    fn on_catalog_end(&self, _scenario_count: usize) {}

    fn on_heuristic_start(&self, _scenario_id: &str) {}
    fn on_heuristic_end(&self, _scenario_id: &str, _entry_count: usize) {}

    fn on_conflict(&self, _conflict: &ConflictRecord) {}

    /// The predictor failed and `fallback` minutes were used instead.
    fn on_prediction_fallback(&self, _train_no: &str, _reason: &str, _fallback: f64) {}

    fn on_ranking_complete(&self, _best_id: Option<&str>, _best_score: f64) {}
}

/// A no-op observer, the default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl DispatchObserver for NullObserver {
    fn name(&self) -> &str {
        "NullObserver"
    }
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl DispatchObserver for TracingObserver {
    fn name(&self) -> &str {
        "TracingObserver"
    }

    fn on_catalog_start(&self, train_count: usize) {
        tracing::info!(train_count, "generating dispatch scenarios");
    }

    fn on_catalog_end(&self, scenario_count: usize) {
        tracing::info!(scenario_count, "generated dispatch scenarios");
    }

    fn on_heuristic_start(&self, scenario_id: &str) {
        tracing::debug!(scenario_id, "heuristic started");
    }

    fn on_heuristic_end(&self, scenario_id: &str, entry_count: usize) {
        tracing::debug!(scenario_id, entry_count, "heuristic finished");
    }

    fn on_conflict(&self, conflict: &ConflictRecord) {
        tracing::warn!(
            platform = conflict.platform,
            first = %conflict.first_train_no,
            second = %conflict.second_train_no,
            gap = conflict.time_gap,
            severity = %conflict.severity,
            "platform conflict"
        );
    }

    fn on_prediction_fallback(&self, train_no: &str, reason: &str, fallback: f64) {
        tracing::warn!(train_no, reason, fallback, "delay prediction failed, using fallback");
    }

    fn on_ranking_complete(&self, best_id: Option<&str>, best_score: f64) {
        tracing::info!(best = ?best_id, best_score, "scenarios ranked");
    }
}

/// Forwards events to a list of boxed observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Box<dyn DispatchObserver>>,
}

impl CompositeObserver {
    #[inline]
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Chain-builder: add an observer and return self.
    #[inline]
    pub fn with<O: DispatchObserver + 'static>(mut self, o: O) -> Self {
        self.observers.push(Box::new(o));
        self
    }

    #[inline]
    pub fn push<O: DispatchObserver + 'static>(&mut self, o: O) {
        self.observers.push(Box::new(o));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl DispatchObserver for CompositeObserver {
    fn name(&self) -> &str {
        "CompositeObserver"
    }

    fn on_catalog_start(&self, train_count: usize) {
        for o in &self.observers {
            o.on_catalog_start(train_count);
        }
    }

    fn on_catalog_end(&self, scenario_count: usize) {
        for o in &self.observers {
            o.on_catalog_end(scenario_count);
        }
    }

    fn on_heuristic_start(&self, scenario_id: &str) {
        for o in &self.observers {
            o.on_heuristic_start(scenario_id);
        }
    }

    fn on_heuristic_end(&self, scenario_id: &str, entry_count: usize) {
        for o in &self.observers {
            o.on_heuristic_end(scenario_id, entry_count);
        }
    }

    fn on_conflict(&self, conflict: &ConflictRecord) {
        for o in &self.observers {
            o.on_conflict(conflict);
        }
    }

    fn on_prediction_fallback(&self, train_no: &str, reason: &str, fallback: f64) {
        for o in &self.observers {
            o.on_prediction_fallback(train_no, reason, fallback);
        }
    }

    fn on_ranking_complete(&self, best_id: Option<&str>, best_score: f64) {
        for o in &self.observers {
            o.on_ranking_complete(best_id, best_score);
        }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("len", &self.observers.len())
            .finish()
    }
}

impl<'a> fmt::Debug for dyn DispatchObserver + 'a {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DispatchObserver({})", self.name())
    }
}
