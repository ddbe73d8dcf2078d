//! Availability selection → weekly schedule.

use std::fmt;

use super::model::{FlexibleHour, WEEK_DAYS};

pub const DEFAULT_START_TIME: &str = "09:00";
pub const DEFAULT_END_TIME: &str = "17:00";

/// The availability option picked on the submission form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilitySelection {
    FullTime,
    PartTime,
    WeekendsOnly,
    CustomSchedule,
    /// Anything the form did not anticipate; yields an all-unavailable week.
    Other(String),
}

impl AvailabilitySelection {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Full-time" => Self::FullTime,
            "Part-time" => Self::PartTime,
            "Weekends only" => Self::WeekendsOnly,
            "Flexible hours (set custom schedule)" => Self::CustomSchedule,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::WeekendsOnly => "Weekends only",
            Self::CustomSchedule => "Flexible hours (set custom schedule)",
            Self::Other(raw) => raw,
        }
    }

    /// Whether `day` is marked available in a synthesized week.
    pub fn covers(&self, day: &str) -> bool {
        match self {
            Self::FullTime => true,
            Self::PartTime => day != "Sunday",
            Self::WeekendsOnly => day == "Saturday" || day == "Sunday",
            Self::CustomSchedule | Self::Other(_) => false,
        }
    }
}

impl fmt::Display for AvailabilitySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the schedule stored on a new profile.
///
/// Custom schedules are taken verbatim when hours were supplied. Every other
/// case synthesizes Monday..Sunday 09:00-17:00 slots, with ids derived from
/// `stamp` so repeated submissions do not collide.
pub fn resolve_availability(
    selection: &AvailabilitySelection,
    flexible_hours: Option<Vec<FlexibleHour>>,
    stamp: i64,
) -> Vec<FlexibleHour> {
    if let (AvailabilitySelection::CustomSchedule, Some(hours)) = (selection, flexible_hours) {
        return hours;
    }
    WEEK_DAYS
        .iter()
        .map(|day| FlexibleHour {
            id: Some(format!("{day}-{stamp}")),
            day: (*day).to_string(),
            start_time: DEFAULT_START_TIME.to_string(),
            end_time: DEFAULT_END_TIME.to_string(),
            available: selection.covers(day),
        })
        .collect()
}
