//! Rule engine for multi-key dispatch ordering.
//!
//! Composes ordering rules lexicographically: the first rule decides,
//! later rules only break ties. Sorting is stable, so entries that tie on
//! every rule keep their input order.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::{OrderingRule, RuleScore};
use crate::models::ScenarioEntry;

/// A composable, sequential rule engine.
///
/// # Example
/// ```
/// use u_dispatch::dispatching::{rules, RuleEngine};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::Platform)
///     .with_rule(rules::LeastDelay);
/// assert_eq!(engine.rule_count(), 2);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn OrderingRule>>,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine (exact score comparison).
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            epsilon: 0.0,
        }
    }

    /// Appends a rule; earlier rules take precedence.
    pub fn with_rule<R: OrderingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Compares scores in buckets of width `epsilon`.
    ///
    /// Scores are quantized to `floor(score / epsilon)` before comparing,
    /// which keeps the ordering total and transitive. Two scores closer
    /// than `epsilon` still split when a bucket boundary falls between
    /// them.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon.abs();
        self
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns indices into `entries` in dispatch order.
    pub fn sort_indices(&self, entries: &[ScenarioEntry]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..entries.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&entries[a], &entries[b]));
        indices
    }

    /// Sorts entries in place into dispatch order (stable).
    pub fn sort(&self, entries: &mut [ScenarioEntry]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }

    /// Returns the index of the entry that would be dispatched first.
    pub fn select_best(&self, entries: &[ScenarioEntry]) -> Option<usize> {
        self.sort_indices(entries).first().copied()
    }

    /// Scores from each rule for one entry.
    pub fn evaluate(&self, entry: &ScenarioEntry) -> Vec<RuleScore> {
        self.rules.iter().map(|rule| rule.evaluate(entry)).collect()
    }

    /// Lexicographic comparison over all rules.
    pub fn compare(&self, a: &ScenarioEntry, b: &ScenarioEntry) -> Ordering {
        for rule in &self.rules {
            let key_a = self.quantize(rule.evaluate(a));
            let key_b = self.quantize(rule.evaluate(b));

            match key_a.partial_cmp(&key_b) {
                Some(Ordering::Equal) | None => continue,
                Some(ord) => return ord,
            }
        }
        Ordering::Equal
    }

    fn quantize(&self, score: RuleScore) -> RuleScore {
        if self.epsilon > 0.0 {
            (score / self.epsilon).floor()
        } else {
            score
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("epsilon", &self.epsilon)
            .finish()
    }
}
