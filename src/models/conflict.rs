//! Platform conflict records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How severe a platform conflict is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConflictSeverity {
    /// Occupancy windows overlap (negative gap).
    High,
    /// Windows do not overlap but separation is below the minimum.
    Medium,
}

impl ConflictSeverity {
    /// Severity for a measured gap (minutes).
    pub fn from_gap(gap_minutes: f64) -> Self {
        if gap_minutes < 0.0 {
            ConflictSeverity::High
        } else {
            ConflictSeverity::Medium
        }
    }
}

impl fmt::Display for ConflictSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictSeverity::High => f.write_str("HIGH"),
            ConflictSeverity::Medium => f.write_str("MEDIUM"),
        }
    }
}

/// Two temporally adjacent trains on one platform with insufficient separation.
///
/// `first` arrives before `second`. Conflicts spanning three or more trains
/// appear as one record per adjacent pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub platform: u32,
    pub first_train_no: String,
    pub first_train_name: String,
    pub second_train_no: String,
    pub second_train_name: String,
    /// `second.arrival - (first.departure + dwell buffer)`, may be negative.
    pub time_gap: f64,
    pub severity: ConflictSeverity,
}
