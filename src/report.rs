//! Control-station report.
//!
//! Packages a ranked catalog for the operator: metadata, every ranking
//! with its metrics and ordered schedule, and the raw train data. The
//! [`Leaderboard`] is the condensed view (top N plus a one-row-per-scenario
//! listing with a status tier).

use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::models::TrainRecord;
use crate::scheduler::ScenarioRanking;

/// Name stamped into every report.
pub const SYSTEM_NAME: &str = "Control Station Decision Support System";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn serialize_timestamp<S: Serializer>(
    ts: &NaiveDateTime,
    s: S,
) -> std::result::Result<S::Ok, S::Error> {
    s.collect_str(&ts.format(TIMESTAMP_FORMAT))
}

/// Report header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    /// Local wall-clock generation time.
    #[serde(rename = "generation_timestamp", serialize_with = "serialize_timestamp")]
    pub generated_at: NaiveDateTime,
    pub total_scenarios: usize,
    pub total_trains: usize,
    pub system: String,
}

/// The full serializable report.
#[derive(Debug, Clone, Serialize)]
pub struct ControlStationReport {
    pub metadata: ReportMetadata,
    pub scenario_rankings: Vec<ScenarioRanking>,
    pub train_data: Vec<Arc<TrainRecord>>,
}

impl ControlStationReport {
    /// Creates a report stamped with the current local time.
    pub fn new(rankings: Vec<ScenarioRanking>, trains: &[Arc<TrainRecord>]) -> Self {
        Self::generated_at(Local::now().naive_local(), rankings, trains)
    }

    /// Creates a report with an explicit generation time.
    pub fn generated_at(
        generated_at: NaiveDateTime,
        rankings: Vec<ScenarioRanking>,
        trains: &[Arc<TrainRecord>],
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at,
                total_scenarios: rankings.len(),
                total_trains: trains.len(),
                system: SYSTEM_NAME.to_string(),
            },
            scenario_rankings: rankings,
            train_data: trains.to_vec(),
        }
    }

    /// The best-ranked scenario, if any.
    pub fn best(&self) -> Option<&ScenarioRanking> {
        self.scenario_rankings.first()
    }

    /// Finds a ranking by scenario id.
    pub fn ranking_for(&self, scenario_id: &str) -> Option<&ScenarioRanking> {
        self.scenario_rankings
            .iter()
            .find(|r| r.scenario.id == scenario_id)
    }

    pub fn leaderboard(&self, top: usize) -> Leaderboard {
        Leaderboard::from_rankings(&self.scenario_rankings, top)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Operator-facing quality tier of a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankingStatus {
    /// Rank 1–3.
    Excellent,
    /// Rank 4–7.
    Good,
    NeedsReview,
}

impl RankingStatus {
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            0..=3 => RankingStatus::Excellent,
            4..=7 => RankingStatus::Good,
            _ => RankingStatus::NeedsReview,
        }
    }
}

impl fmt::Display for RankingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingStatus::Excellent => write!(f, "EXCELLENT"),
            RankingStatus::Good => write!(f, "GOOD"),
            RankingStatus::NeedsReview => write!(f, "NEEDS REVIEW"),
        }
    }
}

/// One condensed leaderboard line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub scenario_id: String,
    pub scenario_name: String,
    pub description: String,
    pub use_case: String,
    pub avg_delay: f64,
    pub platform_conflicts: usize,
    pub passenger_satisfaction: f64,
    pub overall_score: f64,
    pub status: RankingStatus,
}

impl From<&ScenarioRanking> for LeaderboardRow {
    fn from(r: &ScenarioRanking) -> Self {
        Self {
            rank: r.rank,
            scenario_id: r.scenario.id.clone(),
            scenario_name: r.scenario.name.clone(),
            description: r.scenario.description.clone(),
            use_case: r.scenario.use_case.clone(),
            avg_delay: r.metrics.avg_delay,
            platform_conflicts: r.metrics.platform_conflicts,
            passenger_satisfaction: r.metrics.passenger_satisfaction,
            overall_score: r.overall_score,
            status: RankingStatus::for_rank(r.rank),
        }
    }
}

/// Top-N recommendations and the full listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    pub top: Vec<LeaderboardRow>,
    pub all: Vec<LeaderboardRow>,
}

impl Leaderboard {
    /// Builds the leaderboard from rankings already in rank order.
    pub fn from_rankings(rankings: &[ScenarioRanking], top: usize) -> Self {
        let all: Vec<LeaderboardRow> = rankings.iter().map(LeaderboardRow::from).collect();
        Self {
            top: all.iter().take(top).cloned().collect(),
            all,
        }
    }
}
