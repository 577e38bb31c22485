//! Engine configuration.
//!
//! Every constant the scenario engine relies on lives here with the
//! operational default. Configurations can be deserialized from JSON;
//! missing fields fall back to the defaults.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, Result};

/// Weights of the overall ranking score.
///
/// `overall = satisfaction·s + efficiency·e + conflicts·(100 − min(50, c·10))
///          + express·(100 − min(50, p·5))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    pub satisfaction: f64,
    pub efficiency: f64,
    pub conflicts: f64,
    pub express_position: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            satisfaction: 0.4,
            efficiency: 0.3,
            conflicts: 0.2,
            express_position: 0.1,
        }
    }
}

impl RankingWeights {
    fn all(&self) -> [f64; 4] {
        [
            self.satisfaction,
            self.efficiency,
            self.conflicts,
            self.express_position,
        ]
    }
}

/// Scenario engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Allowance added to a departure before checking the next occupant (min).
    pub dwell_buffer_minutes: f64,
    /// Separation below which two platform occupants conflict (min).
    pub min_separation_minutes: f64,
    /// Platforms that reassignment heuristics may move trains to.
    pub platform_pool: Vec<u32>,
    /// Extra delay per position for same-route trains (min).
    pub route_spacing_minutes: f64,
    /// Delay assumed when the predictor fails (min).
    pub fallback_delay_minutes: f64,
    pub weights: RankingWeights,
    /// Rows in the leaderboard's top section.
    pub leaderboard_size: usize,
    /// Build scenarios on the rayon worker pool.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dwell_buffer_minutes: 15.0,
            min_separation_minutes: 10.0,
            platform_pool: (1..=6).collect(),
            route_spacing_minutes: 10.0,
            fallback_delay_minutes: 5.0,
            weights: RankingWeights::default(),
            leaderboard_size: 5,
            parallel: false,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_dwell_buffer(mut self, minutes: f64) -> Self {
        self.dwell_buffer_minutes = minutes;
        self
    }

    pub fn with_min_separation(mut self, minutes: f64) -> Self {
        self.min_separation_minutes = minutes;
        self
    }

    pub fn with_platform_pool(mut self, pool: Vec<u32>) -> Self {
        self.platform_pool = pool;
        self
    }

    pub fn with_route_spacing(mut self, minutes: f64) -> Self {
        self.route_spacing_minutes = minutes;
        self
    }

    pub fn with_fallback_delay(mut self, minutes: f64) -> Self {
        self.fallback_delay_minutes = minutes;
        self
    }

    pub fn with_weights(mut self, weights: RankingWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_leaderboard_size(mut self, size: usize) -> Self {
        self.leaderboard_size = size;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Rejects configurations the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(DispatchError::InvalidConfig(msg.to_string()));

        let minutes = [
            self.dwell_buffer_minutes,
            self.min_separation_minutes,
            self.route_spacing_minutes,
            self.fallback_delay_minutes,
        ];
        if minutes.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return invalid("minute values must be finite and non-negative");
        }
        if self.platform_pool.is_empty() {
            return invalid("platform pool is empty");
        }
        if self.platform_pool.contains(&0) {
            return invalid("platform numbers start at 1");
        }
        let mut seen = HashSet::new();
        if !self.platform_pool.iter().all(|p| seen.insert(*p)) {
            return invalid("platform pool lists a platform twice");
        }
        if self.weights.all().iter().any(|w| !w.is_finite()) {
            return invalid("ranking weights must be finite");
        }
        if self.leaderboard_size == 0 {
            return invalid("leaderboard size must be at least 1");
        }
        Ok(())
    }
}
