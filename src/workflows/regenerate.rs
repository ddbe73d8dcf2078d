use std::time::Duration;

use anyhow::Result;
use tracing::{error, info};
use uuid::Uuid;

use crate::profiles::{LocalProfile, ProfilePatch, ProfileStatus, SharedProfileStore};
use crate::services::template_bio;

use super::tracker::{OperationKind, OperationTracker};

#[derive(Debug, Clone, PartialEq)]
pub enum RegenerationOutcome {
    Regenerated(LocalProfile),
    /// No profile with the requested id; nothing was changed.
    NotFound,
    /// The bio could not be written; the profile was marked as failed.
    Failed(String),
}

/// Rewrites a profile's bio from its own fields after a fixed delay.
/// Errors are absorbed into the profile status and never returned.
pub struct RegenerationWorkflow {
    store: SharedProfileStore,
    tracker: OperationTracker,
    delay: Duration,
}

impl RegenerationWorkflow {
    pub fn new(store: SharedProfileStore, tracker: OperationTracker, delay: Duration) -> Self {
        Self {
            store,
            tracker,
            delay,
        }
    }

    pub async fn execute(&self, profile_id: &str) -> RegenerationOutcome {
        let guard = self.tracker.begin(OperationKind::Regeneration);
        let operation_id = guard.id();
        tokio::time::sleep(self.delay).await;

        let outcome = match self.regenerate(profile_id) {
            Ok(Some(profile)) => {
                info!(%operation_id, id = profile_id, "Regenerated profile bio");
                RegenerationOutcome::Regenerated(profile)
            }
            Ok(None) => RegenerationOutcome::NotFound,
            Err(err) => {
                error!(%operation_id, id = profile_id, "Error regenerating AI content: {err:#}");
                self.mark_failed(operation_id, profile_id);
                RegenerationOutcome::Failed(format!("{err:#}"))
            }
        };
        match &outcome {
            RegenerationOutcome::Failed(message) => guard.finish_err(message.clone()),
            _ => guard.finish_ok(),
        }
        outcome
    }

    fn regenerate(&self, profile_id: &str) -> Result<Option<LocalProfile>> {
        let mut store = self.store.lock();
        let Some(profile) = store.get(profile_id) else {
            return Ok(None);
        };
        let patch = ProfilePatch {
            bio_ai: Some(template_bio(
                &profile.skill,
                profile.years_experience,
                &profile.location,
            )),
            status: Some(ProfileStatus::Ready),
            ..ProfilePatch::default()
        };
        store.upsert_partial(profile_id, &patch)?;
        Ok(store.get(profile_id).cloned())
    }

    fn mark_failed(&self, operation_id: Uuid, profile_id: &str) {
        let patch = ProfilePatch::status(ProfileStatus::AiGenerationFailed);
        if let Err(err) = self.store.lock().upsert_partial(profile_id, &patch) {
            error!(%operation_id, id = profile_id, "Could not record regeneration failure: {err:#}");
        }
    }
}
