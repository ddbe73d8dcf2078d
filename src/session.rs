//! Session facade tying the profile store to its workflows.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::config::{data_dir, AppConfig};
use crate::profiles::{
    LocalProfile, ProfileIdGenerator, ProfilePatch, ProfileStore, SharedProfileStore,
};
use crate::services::{DataUrlEncoder, EnrichmentClient, ImageEncoder, RemoteSyncClient};
use crate::storage::{FileSlotStorage, SlotStorage};
use crate::workflows::{
    OperationTracker, ProfileForm, RegenerationOutcome, RegenerationWorkflow, SubmissionError,
    SubmissionOutcome, SubmissionWorkflow,
};

/// External services a session talks to.
pub struct Collaborators {
    pub enrichment: Arc<dyn EnrichmentClient>,
    pub sync: Option<Arc<dyn RemoteSyncClient>>,
    pub images: Arc<dyn ImageEncoder>,
}

impl Collaborators {
    pub fn new(enrichment: Arc<dyn EnrichmentClient>) -> Self {
        Self {
            enrichment,
            sync: None,
            images: Arc::new(DataUrlEncoder),
        }
    }

    pub fn with_sync(mut self, sync: Arc<dyn RemoteSyncClient>) -> Self {
        self.sync = Some(sync);
        self
    }

    pub fn with_images(mut self, images: Arc<dyn ImageEncoder>) -> Self {
        self.images = images;
        self
    }
}

pub struct ProfileSession {
    store: SharedProfileStore,
    tracker: OperationTracker,
    submission: SubmissionWorkflow,
    regeneration: RegenerationWorkflow,
}

impl ProfileSession {
    /// Opens a session over the file-backed slot described by `config`.
    /// The sync client is dropped when sync is disabled in config.
    pub fn open(config: &AppConfig, mut collaborators: Collaborators) -> Result<Self> {
        let root: PathBuf = data_dir(config)?;
        if !config.sync.enabled {
            collaborators.sync = None;
        }
        info!(data_dir = %root.display(), "Opening profile session");
        Ok(Self::with_storage(
            Arc::new(FileSlotStorage::new(root)),
            &config.storage.slot_name,
            collaborators,
            config.regeneration.delay(),
        ))
    }

    pub fn with_storage(
        storage: Arc<dyn SlotStorage>,
        slot: &str,
        collaborators: Collaborators,
        regeneration_delay: Duration,
    ) -> Self {
        let store = ProfileStore::load(storage, slot);
        let ids = Arc::new(ProfileIdGenerator::after(store.max_numeric_id()));
        let store = store.into_shared();
        let tracker = OperationTracker::new();
        let submission = SubmissionWorkflow::new(
            store.clone(),
            collaborators.enrichment,
            collaborators.images,
            collaborators.sync,
            ids,
            tracker.clone(),
        );
        let regeneration =
            RegenerationWorkflow::new(store.clone(), tracker.clone(), regeneration_delay);
        Self {
            store,
            tracker,
            submission,
            regeneration,
        }
    }

    pub fn profiles(&self) -> Vec<LocalProfile> {
        self.store.lock().list().to_vec()
    }

    pub fn profile(&self, id: &str) -> Option<LocalProfile> {
        self.store.lock().get(id).cloned()
    }

    pub async fn submit_profile(
        &self,
        form: ProfileForm,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        self.submission.execute(form).await
    }

    /// Returns `false` when no profile has `id`.
    pub fn update_profile(&self, id: &str, patch: &ProfilePatch) -> Result<bool> {
        self.store.lock().upsert_partial(id, patch)
    }

    /// Returns `false` when no profile has `id`.
    pub fn delete_profile(&self, id: &str) -> Result<bool> {
        self.store.lock().remove(id)
    }

    pub async fn regenerate_ai_content(&self, id: &str) -> RegenerationOutcome {
        self.regeneration.execute(id).await
    }

    /// True while any submission or regeneration is in flight.
    pub fn loading(&self) -> bool {
        self.tracker.is_busy()
    }

    pub fn tracker(&self) -> &OperationTracker {
        &self.tracker
    }
}
