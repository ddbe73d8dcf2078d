//! Creation of new profiles from submitted form data.
//!
//! Enrichment failures abort the submission before anything is stored.
//! Image and sync failures never do: they are reported on the outcome and
//! the locally committed profile stands.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::profiles::{
    resolve_availability, AvailabilitySelection, FlexibleHour, LocalProfile, ProfileIdGenerator,
    ProfileStatus, SharedProfileStore,
};
use crate::services::{
    EnrichmentClient, EnrichmentRequest, ImageEncoder, ImagePayload, RemoteSyncClient,
    ServiceError,
};

use super::tracker::{OperationKind, OperationTracker};

/// Raw submission form. Fields are trusted as given.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub full_name: String,
    pub skill: String,
    pub years_experience: f64,
    pub location: String,
    pub contact: String,
    pub availability: String,
    #[serde(default)]
    pub flexible_hours: Option<Vec<FlexibleHour>>,
    #[serde(default)]
    pub profile_image: Option<ImagePayload>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    NotProvided,
    Encoded,
    /// The encoder rejected the payload. `DataUrlEncoder` only does so for
    /// MIME types containing `;` or `,`, which would corrupt the data URL.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Synced,
    /// No sync client is configured.
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub operation_id: Uuid,
    pub profile: LocalProfile,
    pub image: ImageOutcome,
    pub sync: SyncOutcome,
}

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error(transparent)]
    Enrichment(#[from] ServiceError),
    #[error("Failed to persist profile: {0:#}")]
    Persistence(anyhow::Error),
}

pub struct SubmissionWorkflow {
    store: SharedProfileStore,
    enrichment: Arc<dyn EnrichmentClient>,
    images: Arc<dyn ImageEncoder>,
    sync: Option<Arc<dyn RemoteSyncClient>>,
    ids: Arc<ProfileIdGenerator>,
    tracker: OperationTracker,
}

impl SubmissionWorkflow {
    pub fn new(
        store: SharedProfileStore,
        enrichment: Arc<dyn EnrichmentClient>,
        images: Arc<dyn ImageEncoder>,
        sync: Option<Arc<dyn RemoteSyncClient>>,
        ids: Arc<ProfileIdGenerator>,
        tracker: OperationTracker,
    ) -> Self {
        Self {
            store,
            enrichment,
            images,
            sync,
            ids,
            tracker,
        }
    }

    pub async fn execute(&self, form: ProfileForm) -> Result<SubmissionOutcome, SubmissionError> {
        let guard = self.tracker.begin(OperationKind::Submission);
        let operation_id = guard.id();
        match self.run(operation_id, form).await {
            Ok(outcome) => {
                guard.finish_ok();
                Ok(outcome)
            }
            Err(err) => {
                error!(%operation_id, "Error submitting profile: {err}");
                guard.finish_err(err.to_string());
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        operation_id: Uuid,
        form: ProfileForm,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        let id = self.ids.next_id();
        debug!(%operation_id, id = %id, "Submitting profile");

        let (profile_image, image) = self.encode_image(form.profile_image.as_ref()).await;

        let selection = AvailabilitySelection::parse(&form.availability);
        let availability = resolve_availability(
            &selection,
            form.flexible_hours,
            Utc::now().timestamp_millis(),
        );

        let request = EnrichmentRequest::new(&form.skill, form.years_experience, &form.location);
        let (bio, price) = tokio::join!(
            self.enrichment.generate_bio(&request),
            self.enrichment.generate_pricing(&request)
        );
        let bio_ai = bio?;
        let suggested_price_zar = price?;
        if !suggested_price_zar.is_finite() {
            return Err(ServiceError::Enrichment(format!(
                "pricing returned a non-finite value ({suggested_price_zar})"
            ))
            .into());
        }

        let profile = LocalProfile {
            id,
            full_name: form.full_name,
            skill: form.skill,
            years_experience: form.years_experience,
            location: form.location,
            contact: form.contact,
            availability,
            status: ProfileStatus::Ready,
            bio_ai: Some(bio_ai),
            suggested_price_zar,
            profile_image,
        };
        self.store
            .lock()
            .append(profile.clone())
            .map_err(SubmissionError::Persistence)?;
        info!(%operation_id, id = %profile.id, skill = %profile.skill, "Profile created");

        let sync = self.mirror(&profile).await;
        Ok(SubmissionOutcome {
            operation_id,
            profile,
            image,
            sync,
        })
    }

    async fn encode_image(&self, image: Option<&ImagePayload>) -> (Option<String>, ImageOutcome) {
        let Some(image) = image else {
            return (None, ImageOutcome::NotProvided);
        };
        match self.images.encode(image).await {
            Ok(encoded) => (Some(encoded), ImageOutcome::Encoded),
            Err(err) => {
                warn!("Failed to encode profile image: {err}");
                (None, ImageOutcome::Failed(err.to_string()))
            }
        }
    }

    async fn mirror(&self, profile: &LocalProfile) -> SyncOutcome {
        let Some(sync) = &self.sync else {
            return SyncOutcome::Skipped;
        };
        match sync.add_profile(profile).await {
            Ok(()) => SyncOutcome::Synced,
            Err(err) => {
                warn!(id = %profile.id, "Failed to sync profile to remote sheet: {err}");
                SyncOutcome::Failed(err.to_string())
            }
        }
    }
}
