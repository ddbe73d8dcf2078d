//! Data structures for service-provider profiles.
//!
//! Field names on the wire are camelCase and match the records already
//! persisted by earlier releases, so renames here are breaking.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt;

/// Weekdays in the order synthesized schedules are emitted.
pub const WEEK_DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One scheduling slot. Overlapping or duplicate days are allowed.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlexibleHour {
    #[serde(default)]
    pub id: Option<String>,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub available: bool,
}

impl FlexibleHour {
    pub fn new(
        day: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        available: bool,
    ) -> Self {
        Self {
            id: None,
            day: day.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            available,
        }
    }
}

/// Outcome of the last enrichment attempt. Unknown values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProfileStatus {
    Ready,
    AiGenerationFailed,
    Other(String),
}

impl ProfileStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ready => "Ready",
            Self::AiGenerationFailed => "AI Generation Failed",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for ProfileStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Ready" => Self::Ready,
            "AI Generation Failed" => Self::AiGenerationFailed,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for ProfileStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ProfileStatus> for String {
    fn from(status: ProfileStatus) -> Self {
        match status {
            ProfileStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A service-provider listing record.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalProfile {
    pub id: String,
    pub full_name: String,
    pub skill: String,
    pub years_experience: f64,
    pub location: String,
    pub contact: String,
    #[serde(default)]
    pub availability: Vec<FlexibleHour>,
    pub status: ProfileStatus,
    #[serde(rename = "bioAI", default)]
    pub bio_ai: Option<String>,
    #[serde(rename = "suggestedPriceZAR")]
    pub suggested_price_zar: f64,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl LocalProfile {
    /// Merges the fields present in `patch`; the id is never touched.
    pub fn apply(&mut self, patch: &ProfilePatch) {
        if let Some(value) = &patch.full_name {
            self.full_name = value.clone();
        }
        if let Some(value) = &patch.skill {
            self.skill = value.clone();
        }
        if let Some(value) = patch.years_experience {
            self.years_experience = value;
        }
        if let Some(value) = &patch.location {
            self.location = value.clone();
        }
        if let Some(value) = &patch.contact {
            self.contact = value.clone();
        }
        if let Some(value) = &patch.availability {
            self.availability = value.clone();
        }
        if let Some(value) = &patch.status {
            self.status = value.clone();
        }
        if let Some(value) = &patch.bio_ai {
            self.bio_ai = Some(value.clone());
        }
        if let Some(value) = patch.suggested_price_zar {
            self.suggested_price_zar = value;
        }
        if let Some(value) = &patch.profile_image {
            self.profile_image = Some(value.clone());
        }
    }
}

/// Partial update merged into an existing profile by id.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub skill: Option<String>,
    pub years_experience: Option<f64>,
    pub location: Option<String>,
    pub contact: Option<String>,
    pub availability: Option<Vec<FlexibleHour>>,
    pub status: Option<ProfileStatus>,
    #[serde(rename = "bioAI")]
    pub bio_ai: Option<String>,
    #[serde(rename = "suggestedPriceZAR")]
    pub suggested_price_zar: Option<f64>,
    pub profile_image: Option<String>,
}

impl ProfilePatch {
    pub fn status(status: ProfileStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
