//! Scenario (candidate dispatch ordering) model.
//!
//! A scenario is one complete ordering of all input trains produced by a
//! single heuristic. Entries are lightweight overlays over shared, immutable
//! [`TrainRecord`]s: each carries its position plus whatever the heuristic
//! changed (platform, delay) without touching the base record, so scenarios
//! never observe each other's edits.

use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::sync::Arc;

use super::{ActualTiming, ClockTime, PlatformOccupant, Priority, TrainRecord};
use crate::error::{DispatchError, Result};

/// Heuristic-specific notes attached to a scenario entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntryAnnotations {
    /// Train was pinned to position 1.
    #[serde(skip_serializing_if = "is_false")]
    pub forced_first: bool,
    /// Platform moved by load balancing.
    #[serde(skip_serializing_if = "is_false")]
    pub platform_changed: bool,
    /// Platform moved to a randomly chosen alternative.
    #[serde(skip_serializing_if = "is_false")]
    pub platform_reassigned: bool,
    /// Delay increased to space out same-route trains.
    #[serde(skip_serializing_if = "is_false")]
    pub route_spacing_applied: bool,
    /// Platform before any reassignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_platform: Option<u32>,
    /// Alternative platform chosen for this train.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_platform: Option<u32>,
    /// Minutes added by route spacing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spacing_added: Option<f64>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One train's place in a scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioEntry {
    train: Arc<TrainRecord>,
    /// 1-based dispatch position (0 until ordered).
    pub order: usize,
    platform_override: Option<u32>,
    delay_override: Option<f64>,
    pub annotations: EntryAnnotations,
}

impl ScenarioEntry {
    /// Creates an unordered entry with no overrides.
    pub fn new(train: Arc<TrainRecord>) -> Self {
        Self {
            train,
            order: 0,
            platform_override: None,
            delay_override: None,
            annotations: EntryAnnotations::default(),
        }
    }

    /// Shared base record.
    pub fn record(&self) -> &Arc<TrainRecord> {
        &self.train
    }

    pub fn train_no(&self) -> &str {
        &self.train.train_no
    }

    pub fn priority(&self) -> Priority {
        self.train.priority
    }

    /// Moves the train to another platform, remembering the first one.
    pub fn reassign_platform(&mut self, platform: u32) {
        if self.annotations.original_platform.is_none() {
            self.annotations.original_platform = Some(self.platform());
        }
        self.platform_override = Some(platform);
    }

    /// Adds minutes to the delay in effect for this scenario.
    pub fn add_delay(&mut self, minutes: f64) {
        self.delay_override = Some(self.predicted_delay() + minutes);
    }
}

impl PlatformOccupant for ScenarioEntry {
    fn train(&self) -> &TrainRecord {
        &self.train
    }

    fn platform(&self) -> u32 {
        self.platform_override.unwrap_or(self.train.platform_no)
    }

    fn predicted_delay(&self) -> f64 {
        self.delay_override.unwrap_or(self.train.predicted_delay)
    }
}

#[derive(Serialize)]
struct EntryView<'a> {
    train_no: &'a str,
    train_name: &'a str,
    train_type: &'a str,
    scheduled_arrival: ClockTime,
    scheduled_departure: ClockTime,
    platform_no: u32,
    priority: Priority,
    predicted_delay: f64,
    source: &'a str,
    destination: &'a str,
    distance: f64,
    weather: &'a str,
    order: usize,
    actual_arrival_minutes: f64,
    actual_departure_minutes: f64,
    #[serde(flatten)]
    annotations: &'a EntryAnnotations,
}

impl Serialize for ScenarioEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let train = &self.train;
        let timing: ActualTiming = self.actual_timing();
        EntryView {
            train_no: &train.train_no,
            train_name: &train.train_name,
            train_type: &train.train_type,
            scheduled_arrival: train.scheduled_arrival,
            scheduled_departure: train.scheduled_departure,
            platform_no: self.platform(),
            priority: train.priority,
            predicted_delay: self.predicted_delay(),
            source: &train.source,
            destination: &train.destination,
            distance: train.distance,
            weather: &train.weather,
            order: self.order,
            actual_arrival_minutes: timing.arrival_minutes,
            actual_departure_minutes: timing.departure_minutes,
            annotations: &self.annotations,
        }
        .serialize(serializer)
    }
}

/// A complete candidate ordering with its operator-facing description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    /// Stable key (e.g. "DEFAULT", "TRAIN_12951_FIRST").
    #[serde(rename = "scenario_id")]
    pub id: String,
    #[serde(rename = "scenario_name")]
    pub name: String,
    pub description: String,
    /// When an operator would pick this scenario.
    pub use_case: String,
    /// Entries in dispatch order.
    #[serde(rename = "schedule")]
    pub entries: Vec<ScenarioEntry>,
}

impl Scenario {
    /// Creates an empty scenario.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            use_case: String::new(),
            entries: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_use_case(mut self, use_case: impl Into<String>) -> Self {
        self.use_case = use_case.into();
        self
    }

    /// Takes entries in dispatch order and numbers them 1..=N.
    pub fn with_ordering(mut self, mut entries: Vec<ScenarioEntry>) -> Self {
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.order = i + 1;
        }
        self.entries = entries;
        self
    }

    /// Number of trains in this scenario.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the entry for a train.
    pub fn entry_for(&self, train_no: &str) -> Option<&ScenarioEntry> {
        self.entries.iter().find(|e| e.train_no() == train_no)
    }

    /// Train numbers in dispatch order.
    pub fn train_order(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.train_no()).collect()
    }

    /// Checks that this scenario is a permutation of `trains`.
    ///
    /// Orders must be exactly `1..=N` and every input train must appear
    /// exactly once.
    pub fn verify_against(&self, trains: &[Arc<TrainRecord>]) -> Result<()> {
        let broken = |reason: String| DispatchError::BrokenOrdering {
            scenario_id: self.id.clone(),
            reason,
        };

        if self.entries.len() != trains.len() {
            return Err(broken(format!(
                "{} entries for {} trains",
                self.entries.len(),
                trains.len()
            )));
        }

        let mut orders: Vec<usize> = self.entries.iter().map(|e| e.order).collect();
        orders.sort_unstable();
        if orders.iter().enumerate().any(|(i, &o)| o != i + 1) {
            return Err(broken("orders are not 1..=N".to_string()));
        }

        let expected: HashSet<&str> = trains.iter().map(|t| t.train_no.as_str()).collect();
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !expected.contains(entry.train_no()) {
                return Err(broken(format!("unexpected train {}", entry.train_no())));
            }
            if !seen.insert(entry.train_no()) {
                return Err(broken(format!("train {} appears twice", entry.train_no())));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(trains: Vec<TrainRecord>) -> Vec<Arc<TrainRecord>> {
        trains.into_iter().map(Arc::new).collect()
    }

    fn entries(trains: &[Arc<TrainRecord>]) -> Vec<ScenarioEntry> {
        trains.iter().cloned().map(ScenarioEntry::new).collect()
    }

    #[test]
    fn test_overrides_do_not_touch_base() {
        let trains = shared(vec![TrainRecord::new("A").with_platform(2).with_delay(5.0)]);
        let mut entry = ScenarioEntry::new(trains[0].clone());
        entry.reassign_platform(4);
        entry.add_delay(10.0);

        assert_eq!(entry.platform(), 4);
        assert!((entry.predicted_delay() - 15.0).abs() < 1e-10);
        assert_eq!(entry.annotations.original_platform, Some(2));
        assert_eq!(trains[0].platform_no, 2);
        assert!((trains[0].predicted_delay - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_original_platform_kept_on_second_move() {
        let trains = shared(vec![TrainRecord::new("A").with_platform(2)]);
        let mut entry = ScenarioEntry::new(trains[0].clone());
        entry.reassign_platform(3);
        entry.reassign_platform(5);
        assert_eq!(entry.platform(), 5);
        assert_eq!(entry.annotations.original_platform, Some(2));
    }

    #[test]
    fn test_with_ordering_numbers_from_one() {
        let trains = shared(vec![
            TrainRecord::new("A"),
            TrainRecord::new("B"),
            TrainRecord::new("C"),
        ]);
        let scenario = Scenario::new("X", "X").with_ordering(entries(&trains));
        let orders: Vec<usize> = scenario.entries.iter().map(|e| e.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(scenario.train_order(), vec!["A", "B", "C"]);
        assert!(scenario.verify_against(&trains).is_ok());
    }

    #[test]
    fn test_verify_detects_missing_and_duplicate() {
        let trains = shared(vec![TrainRecord::new("A"), TrainRecord::new("B")]);

        let missing = Scenario::new("M", "M").with_ordering(entries(&trains[..1]));
        assert!(missing.verify_against(&trains).is_err());

        let dup = Scenario::new("D", "D")
            .with_ordering(vec![
                ScenarioEntry::new(trains[0].clone()),
                ScenarioEntry::new(trains[0].clone()),
            ]);
        assert!(dup.verify_against(&trains).is_err());

        let mut gap = Scenario::new("G", "G").with_ordering(entries(&trains));
        gap.entries[1].order = 3;
        assert!(gap.verify_against(&trains).is_err());
    }

    #[test]
    fn test_entry_serialization_uses_effective_values() {
        let trains = shared(vec![TrainRecord::new("A")
            .with_arrival(10, 0)
            .with_departure(10, 10)
            .with_platform(2)
            .with_delay(5.0)]);
        let mut entry = ScenarioEntry::new(trains[0].clone());
        entry.reassign_platform(6);
        entry.annotations.platform_reassigned = true;
        entry.order = 1;

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["platform_no"], 6);
        assert_eq!(value["original_platform"], 2);
        assert_eq!(value["platform_reassigned"], true);
        assert_eq!(value["order"], 1);
        assert!((value["actual_arrival_minutes"].as_f64().unwrap() - 605.0).abs() < 1e-10);
        assert!(value.get("forced_first").is_none());
    }
}
