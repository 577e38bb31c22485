//! Train model.
//!
//! A train record is the immutable input unit of the dispatch engine:
//! one physical train with its timetable slot, platform assignment and
//! predicted delay.

use serde::{Deserialize, Serialize};

use super::ClockTime;
use crate::error::DispatchError;

/// Route length assumed when none is recorded, in km.
pub const DEFAULT_DISTANCE_KM: f64 = 50.0;
/// Weather assumed when none is recorded.
pub const DEFAULT_WEATHER: &str = "Clear";

fn default_distance() -> f64 {
    DEFAULT_DISTANCE_KM
}

fn default_weather() -> String {
    DEFAULT_WEATHER.to_string()
}

/// Dispatch priority class, derived from free-text train type.
///
/// Lower level = more important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    /// Express and superfast services (level 1).
    Express,
    /// Everything not matched by the other classes (level 2).
    Other,
    /// Passenger and local services (level 3).
    Local,
}

impl Priority {
    /// Classifies a train type by case-insensitive substring match.
    ///
    /// "EXPRESS"/"SUPERFAST" win over "PASSENGER"/"LOCAL", so an
    /// "Express Passenger" is an express.
    pub fn classify(train_type: &str) -> Self {
        let upper = train_type.to_uppercase();
        if upper.contains("EXPRESS") || upper.contains("SUPERFAST") {
            Priority::Express
        } else if upper.contains("PASSENGER") || upper.contains("LOCAL") {
            Priority::Local
        } else {
            Priority::Other
        }
    }

    /// Numeric level (1, 2 or 3).
    pub fn level(self) -> u8 {
        match self {
            Priority::Express => 1,
            Priority::Other => 2,
            Priority::Local => 3,
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.level()
    }
}

impl TryFrom<u8> for Priority {
    type Error = DispatchError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Priority::Express),
            2 => Ok(Priority::Other),
            3 => Ok(Priority::Local),
            other => Err(DispatchError::InvalidPriority(other)),
        }
    }
}

/// A train to be dispatched.
///
/// Records are built once per run and shared read-only between scenarios.
/// `priority` is derived from `train_type` whenever the type is set and is
/// never deserialized from input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTrainRecord")]
pub struct TrainRecord {
    /// Unique train number.
    pub train_no: String,
    /// Human-readable name.
    pub train_name: String,
    /// Free-text train type (e.g. "SUPERFAST EXPRESS").
    pub train_type: String,
    /// Scheduled arrival (wall clock).
    pub scheduled_arrival: ClockTime,
    /// Scheduled departure (wall clock).
    pub scheduled_departure: ClockTime,
    /// Assigned platform (1-based).
    pub platform_no: u32,
    /// Priority class derived from `train_type`.
    pub priority: Priority,
    /// Predicted delay in minutes.
    pub predicted_delay: f64,
    /// Source station name.
    pub source: String,
    /// Destination station name.
    pub destination: String,
    /// Route distance (km).
    pub distance: f64,
    /// Weather condition at dispatch time.
    pub weather: String,
}

impl TrainRecord {
    /// Creates a train with the given number and placeholder values.
    ///
    /// The name defaults to "Train {no}", the platform to 1 and the type
    /// to empty (priority `Other`).
    pub fn new(train_no: impl Into<String>) -> Self {
        let train_no = train_no.into();
        Self {
            train_name: format!("Train {train_no}"),
            train_no,
            train_type: String::new(),
            scheduled_arrival: ClockTime::new(12, 0),
            scheduled_departure: ClockTime::new(13, 0),
            platform_no: 1,
            priority: Priority::Other,
            predicted_delay: 0.0,
            source: String::new(),
            destination: String::new(),
            distance: DEFAULT_DISTANCE_KM,
            weather: default_weather(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.train_name = name.into();
        self
    }

    /// Sets the train type and re-derives the priority.
    pub fn with_type(mut self, train_type: impl Into<String>) -> Self {
        self.train_type = train_type.into();
        self.priority = Priority::classify(&self.train_type);
        self
    }

    pub fn with_arrival(mut self, hour: u8, minute: u8) -> Self {
        self.scheduled_arrival = ClockTime::new(hour, minute);
        self
    }

    pub fn with_departure(mut self, hour: u8, minute: u8) -> Self {
        self.scheduled_departure = ClockTime::new(hour, minute);
        self
    }

    pub fn with_platform(mut self, platform_no: u32) -> Self {
        self.platform_no = platform_no;
        self
    }

    pub fn with_delay(mut self, predicted_delay: f64) -> Self {
        self.predicted_delay = predicted_delay;
        self
    }

    /// Sets source and destination station names.
    pub fn with_route(mut self, source: impl Into<String>, destination: impl Into<String>) -> Self {
        self.source = source.into();
        self.destination = destination.into();
        self
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_weather(mut self, weather: impl Into<String>) -> Self {
        self.weather = weather.into();
        self
    }

    /// Scheduled arrival as minutes of day.
    pub fn scheduled_arrival_minutes(&self) -> u32 {
        self.scheduled_arrival.minutes_of_day()
    }

    /// Scheduled departure as minutes of day.
    pub fn scheduled_departure_minutes(&self) -> u32 {
        self.scheduled_departure.minutes_of_day()
    }
}

#[derive(Deserialize)]
struct RawTrainRecord {
    train_no: String,
    #[serde(default)]
    train_name: Option<String>,
    #[serde(default)]
    train_type: String,
    scheduled_arrival: ClockTime,
    scheduled_departure: ClockTime,
    platform_no: u32,
    #[serde(default)]
    predicted_delay: f64,
    #[serde(default)]
    source: String,
    #[serde(default)]
    destination: String,
    #[serde(default = "default_distance")]
    distance: f64,
    #[serde(default = "default_weather")]
    weather: String,
}

impl From<RawTrainRecord> for TrainRecord {
    fn from(raw: RawTrainRecord) -> Self {
        let priority = Priority::classify(&raw.train_type);
        Self {
            train_name: raw
                .train_name
                .unwrap_or_else(|| format!("Train {}", raw.train_no)),
            train_no: raw.train_no,
            train_type: raw.train_type,
            scheduled_arrival: raw.scheduled_arrival,
            scheduled_departure: raw.scheduled_departure,
            platform_no: raw.platform_no,
            priority,
            predicted_delay: raw.predicted_delay,
            source: raw.source,
            destination: raw.destination,
            distance: raw.distance,
            weather: raw.weather,
        }
    }
}
