//! Platform conflict detection.
//!
//! # Algorithm
//!
//! 1. Group occupants by platform.
//! 2. Within each platform with two or more trains, sort by actual arrival.
//! 3. For each adjacent pair compute
//!    `gap = next.arrival − (current.departure + dwell_buffer)`.
//! 4. Report the pair when `gap < min_separation`; HIGH if `gap < 0`.
//!
//! Only adjacent pairs are checked. The detector is advisory: it never
//! changes an ordering.

use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::models::{ConflictRecord, ConflictSeverity, PlatformOccupant};
use crate::observer::DispatchObserver;

/// Finds platform occupants whose windows are too close together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConflictDetector {
    dwell_buffer_minutes: f64,
    min_separation_minutes: f64,
}

impl ConflictDetector {
    pub fn new(dwell_buffer_minutes: f64, min_separation_minutes: f64) -> Self {
        Self {
            dwell_buffer_minutes,
            min_separation_minutes,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.dwell_buffer_minutes, config.min_separation_minutes)
    }

    /// Detects conflicts, reporting each one to `observer`.
    ///
    /// Records are returned by ascending platform number, then by arrival.
    pub fn detect<T: PlatformOccupant>(
        &self,
        occupants: &[T],
        observer: &dyn DispatchObserver,
    ) -> Vec<ConflictRecord> {
        let mut by_platform: BTreeMap<u32, Vec<(&T, f64, f64)>> = BTreeMap::new();
        for occupant in occupants {
            let timing = occupant.actual_timing();
            by_platform.entry(occupant.platform()).or_default().push((
                occupant,
                timing.arrival_minutes,
                timing.departure_minutes,
            ));
        }

        let mut conflicts = Vec::new();
        for (platform, mut group) in by_platform {
            if group.len() < 2 {
                continue;
            }
            group.sort_by(|a, b| a.1.total_cmp(&b.1));

            for pair in group.windows(2) {
                let (current, _, current_departure) = pair[0];
                let (next, next_arrival, _) = pair[1];

                let gap = next_arrival - (current_departure + self.dwell_buffer_minutes);
                if gap < self.min_separation_minutes {
                    let conflict = ConflictRecord {
                        platform,
                        first_train_no: current.train().train_no.clone(),
                        first_train_name: current.train().train_name.clone(),
                        second_train_no: next.train().train_no.clone(),
                        second_train_name: next.train().train_name.clone(),
                        time_gap: gap,
                        severity: ConflictSeverity::from_gap(gap),
                    };
                    observer.on_conflict(&conflict);
                    conflicts.push(conflict);
                }
            }
        }

        conflicts
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrainRecord;
    use crate::observer::recording::RecordingObserver;
    use crate::observer::NullObserver;

    fn train(no: &str, platform: u32, arrive: (u8, u8), depart: (u8, u8)) -> TrainRecord {
        TrainRecord::new(no)
            .with_platform(platform)
            .with_arrival(arrive.0, arrive.1)
            .with_departure(depart.0, depart.1)
    }

    #[test]
    fn test_overlap_is_high() {
        // A departs at 100, B arrives at 105: gap = 105 - (100 + 15) = -10
        let trains = vec![train("A", 3, (1, 30), (1, 40)), train("B", 3, (1, 45), (2, 0))];
        let conflicts = ConflictDetector::default().detect(&trains, &NullObserver);

        assert_eq!(conflicts.len(), 1);
        let c = &conflicts[0];
        assert_eq!(c.platform, 3);
        assert_eq!(c.first_train_no, "A");
        assert_eq!(c.second_train_no, "B");
        assert!((c.time_gap + 10.0).abs() < 1e-10);
        assert_eq!(c.severity, ConflictSeverity::High);
    }

    #[test]
    fn test_short_gap_is_medium() {
        // gap = 122 - (100 + 15) = 7
        let trains = vec![train("A", 1, (1, 30), (1, 40)), train("B", 1, (2, 2), (2, 10))];
        let conflicts = ConflictDetector::default().detect(&trains, &NullObserver);
        assert_eq!(conflicts.len(), 1);
        assert!((conflicts[0].time_gap - 7.0).abs() < 1e-10);
        assert_eq!(conflicts[0].severity, ConflictSeverity::Medium);
    }

    #[test]
    fn test_enough_separation() {
        // gap = 125 - 115 = 10, not below 10
        let trains = vec![train("A", 1, (1, 30), (1, 40)), train("B", 1, (2, 5), (2, 10))];
        assert!(ConflictDetector::default()
            .detect(&trains, &NullObserver)
            .is_empty());
    }

    #[test]
    fn test_different_platforms_never_conflict() {
        let trains = vec![train("A", 1, (8, 0), (8, 10)), train("B", 2, (8, 0), (8, 10))];
        assert!(ConflictDetector::default()
            .detect(&trains, &NullObserver)
            .is_empty());
    }

    #[test]
    fn test_sorted_by_actual_arrival() {
        // B is scheduled later but A's delay pushes it behind B
        let trains = vec![
            train("A", 2, (8, 0), (8, 5)).with_delay(30.0),
            train("B", 2, (8, 10), (8, 15)),
        ];
        let conflicts = ConflictDetector::default().detect(&trains, &NullObserver);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].first_train_no, "B");
        assert_eq!(conflicts[0].second_train_no, "A");
        // 510 - (495 + 15) = 0
        assert!(conflicts[0].time_gap.abs() < 1e-10);
    }

    #[test]
    fn test_only_adjacent_pairs() {
        let trains = vec![
            train("A", 1, (8, 0), (8, 10)),
            train("B", 1, (8, 5), (8, 15)),
            train("C", 1, (8, 20), (8, 30)),
        ];
        let observer = RecordingObserver::default();
        let conflicts = ConflictDetector::default().detect(&trains, &observer);
        let pairs: Vec<(&str, &str)> = conflicts
            .iter()
            .map(|c| (c.first_train_no.as_str(), c.second_train_no.as_str()))
            .collect();
        assert_eq!(pairs, vec![("A", "B"), ("B", "C")]);
        assert_eq!(observer.snapshot().conflicts, 2);
    }

    #[test]
    fn test_custom_thresholds() {
        let trains = vec![train("A", 1, (8, 0), (8, 10)), train("B", 1, (8, 12), (8, 20))];
        assert!(ConflictDetector::new(0.0, 1.0)
            .detect(&trains, &NullObserver)
            .is_empty());
        assert_eq!(
            ConflictDetector::new(0.0, 5.0)
                .detect(&trains, &NullObserver)
                .len(),
            1
        );
    }

    #[test]
    fn test_empty_and_single() {
        let detector = ConflictDetector::default();
        assert!(detector.detect::<TrainRecord>(&[], &NullObserver).is_empty());
        assert!(detector
            .detect(&[train("A", 1, (8, 0), (8, 10))], &NullObserver)
            .is_empty());
    }
}
