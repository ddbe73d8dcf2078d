//! Versioned envelope for the persisted profile collection.
//!
//! Releases before the envelope wrote a bare JSON array of profiles; those
//! payloads are treated as schema version 0 and upgraded on read.

use std::collections::HashSet;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::profiles::model::LocalProfile;

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a> {
    schema_version: u32,
    profiles: &'a [LocalProfile],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    schema_version: u32,
    #[serde(default)]
    profiles: Value,
}

/// Serializes `profiles` under the current schema version.
///
/// JSON has no encoding for NaN or infinity (serde_json writes `null`, which
/// would not decode again), so such records are refused.
pub fn encode_profiles(profiles: &[LocalProfile]) -> Result<String> {
    for profile in profiles {
        if !profile.years_experience.is_finite() {
            bail!(
                "Profile {} has a non-finite yearsExperience ({})",
                profile.id,
                profile.years_experience
            );
        }
        if !profile.suggested_price_zar.is_finite() {
            bail!(
                "Profile {} has a non-finite suggestedPriceZAR ({})",
                profile.id,
                profile.suggested_price_zar
            );
        }
    }
    let envelope = EnvelopeRef {
        schema_version: CURRENT_SCHEMA_VERSION,
        profiles,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parses a persisted payload of any known version.
pub fn decode_profiles(payload: &str) -> Result<Vec<LocalProfile>> {
    let value: Value = serde_json::from_str(payload).context("Persisted profiles are not JSON")?;
    let (version, records) = match value {
        Value::Array(_) => (0, value),
        Value::Object(_) => {
            let envelope: Envelope =
                serde_json::from_value(value).context("Malformed profile envelope")?;
            (envelope.schema_version, envelope.profiles)
        }
        other => bail!("Unexpected persisted profile payload: {other}"),
    };
    let records = migrate(version, records)?;
    let profiles: Vec<LocalProfile> = serde_json::from_value(records)
        .context("Persisted profiles do not match the record shape")?;
    Ok(dedupe_ids(profiles))
}

/// Keeps the first record for every id.
fn dedupe_ids(profiles: Vec<LocalProfile>) -> Vec<LocalProfile> {
    let mut seen = HashSet::new();
    profiles
        .into_iter()
        .filter(|profile| {
            let first = seen.insert(profile.id.clone());
            if !first {
                warn!(id = %profile.id, "Dropping persisted profile with duplicate id");
            }
            first
        })
        .collect()
}

fn migrate(mut version: u32, mut records: Value) -> Result<Value> {
    if version > CURRENT_SCHEMA_VERSION {
        bail!(
            "Persisted profiles use schema version {version}, newer than supported {CURRENT_SCHEMA_VERSION}"
        );
    }
    while version < CURRENT_SCHEMA_VERSION {
        records = match version {
            0 => migrate_v0_to_v1(records),
            other => bail!("No migration registered for schema version {other}"),
        };
        version += 1;
    }
    Ok(records)
}

/// v0 stored an empty string when no image was supplied.
fn migrate_v0_to_v1(mut records: Value) -> Value {
    if let Value::Array(items) = &mut records {
        for item in items.iter_mut() {
            if let Value::Object(map) = item {
                let empty_image = matches!(map.get("profileImage"), Some(Value::String(s)) if s.is_empty());
                if empty_image {
                    map.remove("profileImage");
                }
            }
        }
    }
    records
}
