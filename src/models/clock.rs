//! Wall-clock times and delay-adjusted timings.
//!
//! # Time Normalization
//!
//! `actual = scheduled_minutes_of_day + predicted_delay`, computed
//! independently for arrival and departure. There is no clamping and no
//! wrap at 1440: a train pushed past midnight reports e.g. "25:30".

use serde::{Deserialize, Serialize};
use std::fmt;

use super::TrainRecord;
use crate::error::{DispatchError, Result};

/// A 24-hour wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes_of_day(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    /// Whether hour ∈ [0,23] and minute ∈ [0,59].
    pub fn is_valid(&self) -> bool {
        self.hour < 24 && self.minute < 60
    }

    /// Parses "HH:MM", "H:MM", "HHMM" or "HMM".
    ///
    /// Empty hour or minute parts read as 0. A three-digit value is
    /// left-padded ("800" is 08:00). Range is not checked here.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let invalid = || DispatchError::InvalidClockTime(text.to_string());

        let (hour_part, minute_part) = match text.split_once(':') {
            Some((h, rest)) => (h, rest.split(':').next().unwrap_or("")),
            None => {
                if !text.chars().all(|c| c.is_ascii_digit()) || text.len() > 4 {
                    return Err(invalid());
                }
                let split = text.len().saturating_sub(2);
                (&text[..split], &text[split..])
            }
        };

        let parse_part = |part: &str| -> Result<u8> {
            if part.is_empty() {
                Ok(0)
            } else {
                part.parse::<u8>().map_err(|_| invalid())
            }
        };

        Ok(Self::new(parse_part(hour_part)?, parse_part(minute_part)?))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Delay-adjusted arrival and departure, in minutes of day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActualTiming {
    pub arrival_minutes: f64,
    pub departure_minutes: f64,
}

impl ActualTiming {
    /// Normalizes a train's scheduled slot with the given delay.
    ///
    /// The delay is passed explicitly because scenarios may override the
    /// train's own prediction (route spacing).
    pub fn of(train: &TrainRecord, predicted_delay: f64) -> Self {
        Self {
            arrival_minutes: train.scheduled_arrival_minutes() as f64 + predicted_delay,
            departure_minutes: train.scheduled_departure_minutes() as f64 + predicted_delay,
        }
    }

    /// Arrival rendered as "HH:MM" (unwrapped).
    pub fn arrival_label(&self) -> String {
        format_minutes(self.arrival_minutes)
    }

    /// Departure rendered as "HH:MM" (unwrapped).
    pub fn departure_label(&self) -> String {
        format_minutes(self.departure_minutes)
    }
}

/// Formats minutes of day as "HH:MM" without wrapping at midnight.
///
/// Fractional minutes are truncated.
pub fn format_minutes(minutes: f64) -> String {
    let hours = (minutes / 60.0).floor() as i64;
    let rest = minutes.rem_euclid(60.0) as i64;
    format!("{hours:02}:{rest:02}")
}
