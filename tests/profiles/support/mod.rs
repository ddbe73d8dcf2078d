use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use localpros::profiles::LocalProfile;
use localpros::services::{
    EnrichmentClient, EnrichmentRequest, RemoteSyncClient, ServiceError, ServiceResult,
};
use localpros::storage::FileSlotStorage;
use localpros::workflows::ProfileForm;
use localpros::{Collaborators, ProfileSession};
use parking_lot::Mutex;
use tempfile::TempDir;
use tokio::sync::Notify;

pub const SLOT: &str = "localProfiles";

/// Returns fixed enrichment values and records every request it receives.
pub struct StubEnrichment {
    pub bio: String,
    pub price: f64,
    pub fail_bio: bool,
    pub gate: Option<Arc<Notify>>,
    pub requests: Mutex<Vec<EnrichmentRequest>>,
}

impl StubEnrichment {
    pub fn new(bio: &str, price: f64) -> Self {
        Self {
            bio: bio.to_string(),
            price,
            fail_bio: false,
            gate: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_bio: true,
            ..Self::new("unused", 0.0)
        }
    }

    /// Bio generation blocks until `gate` is notified.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new("stub-bio", 350.0)
        }
    }
}

#[async_trait]
impl EnrichmentClient for StubEnrichment {
    async fn generate_bio(&self, request: &EnrichmentRequest) -> ServiceResult<String> {
        self.requests.lock().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail_bio {
            return Err(ServiceError::Enrichment("quota exhausted".into()));
        }
        Ok(self.bio.clone())
    }

    async fn generate_pricing(&self, request: &EnrichmentRequest) -> ServiceResult<f64> {
        self.requests.lock().push(request.clone());
        Ok(self.price)
    }
}

/// Records mirrored profiles, optionally failing every call.
#[derive(Default)]
pub struct RecordingSync {
    pub fail: bool,
    pub synced: Mutex<Vec<String>>,
}

#[async_trait]
impl RemoteSyncClient for RecordingSync {
    async fn add_profile(&self, profile: &LocalProfile) -> ServiceResult<()> {
        if self.fail {
            return Err(ServiceError::Sync("sheet is read-only".into()));
        }
        self.synced.lock().push(profile.id.clone());
        Ok(())
    }
}

/// Temporary data directory plus helpers to (re)open sessions over it.
pub struct SessionHarness {
    pub workspace: TempDir,
}

impl SessionHarness {
    pub fn new() -> Self {
        Self {
            workspace: TempDir::new().expect("failed to create temp workspace"),
        }
    }

    pub fn storage(&self) -> Arc<FileSlotStorage> {
        Arc::new(FileSlotStorage::new(self.workspace.path().join("data")))
    }

    pub fn slot_path(&self) -> std::path::PathBuf {
        self.workspace.path().join("data").join(format!("{SLOT}.json"))
    }

    pub fn open(&self, collaborators: Collaborators) -> ProfileSession {
        ProfileSession::with_storage(self.storage(), SLOT, collaborators, Duration::ZERO)
    }

    pub fn open_with(&self, enrichment: StubEnrichment) -> ProfileSession {
        self.open(Collaborators::new(Arc::new(enrichment)))
    }
}

pub fn jane_doe_form() -> ProfileForm {
    ProfileForm {
        full_name: "Jane Doe".into(),
        skill: "Plumbing".into(),
        years_experience: 5.0,
        location: "Cape Town".into(),
        contact: "jane@x.com".into(),
        availability: "Full-time".into(),
        ..ProfileForm::default()
    }
}
