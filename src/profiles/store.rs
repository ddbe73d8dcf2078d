//! In-memory profile collection with write-through persistence.
//!
//! Every mutation serializes the full candidate collection and writes it to
//! the slot before the in-memory state is replaced, so a failed write leaves
//! both sides exactly as they were.

use std::sync::Arc;

use anyhow::{bail, Result};
use parking_lot::Mutex;
use tracing::{debug, error, info};

use crate::profiles::model::{LocalProfile, ProfilePatch};
use crate::storage::{decode_profiles, encode_profiles, SlotStorage};

/// Store handle shared between workflows. Never hold the lock across an await.
pub type SharedProfileStore = Arc<Mutex<ProfileStore>>;

pub struct ProfileStore {
    storage: Arc<dyn SlotStorage>,
    slot: String,
    profiles: Vec<LocalProfile>,
}

impl ProfileStore {
    /// Hydrates from `slot`. Unreadable or malformed payloads yield an empty
    /// store; the condition is logged, never returned.
    pub fn load(storage: Arc<dyn SlotStorage>, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let profiles = match storage.read_slot(&slot) {
            Ok(Some(payload)) => match decode_profiles(&payload) {
                Ok(profiles) => profiles,
                Err(err) => {
                    error!(slot = %slot, "Error loading profiles from storage: {err:#}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                error!(slot = %slot, "Error reading profile slot: {err:#}");
                Vec::new()
            }
        };
        info!(slot = %slot, count = profiles.len(), "Profile store hydrated");
        Self {
            storage,
            slot,
            profiles,
        }
    }

    pub fn into_shared(self) -> SharedProfileStore {
        Arc::new(Mutex::new(self))
    }

    /// Profiles in insertion order.
    pub fn list(&self) -> &[LocalProfile] {
        &self.profiles
    }

    pub fn get(&self, id: &str) -> Option<&LocalProfile> {
        self.profiles.iter().find(|profile| profile.id == id)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Largest numeric id in the collection, used to seed id generation.
    pub fn max_numeric_id(&self) -> Option<u64> {
        self.profiles
            .iter()
            .filter_map(|profile| profile.id.parse::<u64>().ok())
            .max()
    }

    pub fn append(&mut self, profile: LocalProfile) -> Result<()> {
        if self.get(&profile.id).is_some() {
            bail!("A profile with id {} already exists", profile.id);
        }
        let mut next = self.profiles.clone();
        next.push(profile);
        self.commit(next)
    }

    /// Merges `patch` into the profile with `id`. Returns `false` without
    /// touching storage when no profile matches.
    pub fn upsert_partial(&mut self, id: &str, patch: &ProfilePatch) -> Result<bool> {
        let Some(index) = self.position(id) else {
            debug!(id, "Ignoring update for unknown profile");
            return Ok(false);
        };
        let mut next = self.profiles.clone();
        next[index].apply(patch);
        self.commit(next)?;
        Ok(true)
    }

    /// Removes the profile with `id`. Returns `false` when it was already absent.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        if self.position(id).is_none() {
            return Ok(false);
        }
        let next = self
            .profiles
            .iter()
            .filter(|profile| profile.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        Ok(true)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.profiles.iter().position(|profile| profile.id == id)
    }

    fn commit(&mut self, next: Vec<LocalProfile>) -> Result<()> {
        let payload = encode_profiles(&next)?;
        self.storage.write_slot(&self.slot, &payload)?;
        self.profiles = next;
        Ok(())
    }
}
