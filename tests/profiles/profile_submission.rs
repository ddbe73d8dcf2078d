use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

use localpros::profiles::{FlexibleHour, ProfileStatus};
use localpros::services::EnrichmentRequest;
use localpros::workflows::{OperationKind, OperationState, SubmissionError, SyncOutcome};
use localpros::Collaborators;
use serde_json::json;
use tokio::sync::Notify;

use crate::support::{jane_doe_form, RecordingSync, SessionHarness, StubEnrichment};

#[tokio::test]
async fn jane_doe_submission_is_enriched_and_fully_available() {
    let harness = SessionHarness::new();
    let session = harness.open_with(StubEnrichment::new("stub-bio", 350.0));

    let outcome = session.submit_profile(jane_doe_form()).await.unwrap();
    let profile = outcome.profile;
    assert_eq!(profile.status, ProfileStatus::Ready);
    assert_eq!(profile.bio_ai.as_deref(), Some("stub-bio"));
    assert_eq!(profile.suggested_price_zar, 350.0);
    assert_eq!(profile.availability.len(), 7);
    assert!(profile.availability.iter().all(|slot| slot.available));
    assert_eq!(session.profiles(), vec![profile]);
}

#[tokio::test]
async fn enrichment_is_keyed_on_skill_experience_and_location() {
    let harness = SessionHarness::new();
    let enrichment = Arc::new(StubEnrichment::new("stub-bio", 350.0));
    let session = harness.open(Collaborators::new(enrichment.clone()));

    session.submit_profile(jane_doe_form()).await.unwrap();
    let expected = EnrichmentRequest::new("Plumbing", 5.0, "Cape Town");
    let requests = enrichment.requests.lock().clone();
    assert_eq!(requests, vec![expected.clone(), expected]);
}

#[tokio::test]
async fn enrichment_failure_leaves_store_unchanged() {
    let harness = SessionHarness::new();
    let seeded = harness.open_with(StubEnrichment::new("first", 100.0));
    seeded.submit_profile(jane_doe_form()).await.unwrap();
    let before = seeded.profiles();
    drop(seeded);

    let session = harness.open_with(StubEnrichment::failing());
    let err = session.submit_profile(jane_doe_form()).await.unwrap_err();
    assert!(matches!(err, SubmissionError::Enrichment(_)));
    assert_eq!(session.profiles(), before);
    assert!(!session.loading());

    let reopened = harness.open_with(StubEnrichment::new("unused", 0.0));
    assert_eq!(reopened.profiles(), before);
}

#[tokio::test]
async fn non_finite_price_keeps_earlier_profiles_loadable() {
    let harness = SessionHarness::new();
    let seeded = harness.open_with(StubEnrichment::new("first", 350.0));
    seeded.submit_profile(jane_doe_form()).await.unwrap();
    let before = seeded.profiles();
    drop(seeded);

    let session = harness.open_with(StubEnrichment::new("stub-bio", f64::NAN));
    let err = session.submit_profile(jane_doe_form()).await.unwrap_err();
    assert!(matches!(err, SubmissionError::Enrichment(_)));
    assert_eq!(session.profiles(), before);

    let reopened = harness.open_with(StubEnrichment::new("unused", 0.0));
    assert_eq!(reopened.profiles(), before);
}

#[tokio::test]
async fn stored_id_at_integer_limit_does_not_break_id_generation() {
    let harness = SessionHarness::new();
    fs::create_dir_all(harness.slot_path().parent().unwrap()).unwrap();
    let stored = json!({
        "schemaVersion": 1,
        "profiles": [{
            "id": u64::MAX.to_string(),
            "fullName": "Imported Provider",
            "skill": "Welding",
            "yearsExperience": 3,
            "location": "Polokwane",
            "contact": "weld@example.com",
            "availability": [],
            "status": "Ready",
            "suggestedPriceZAR": 300
        }]
    });
    fs::write(harness.slot_path(), stored.to_string()).unwrap();

    let session = harness.open_with(StubEnrichment::new("stub-bio", 350.0));
    let outcome = session.submit_profile(jane_doe_form()).await.unwrap();
    assert_ne!(outcome.profile.id, u64::MAX.to_string());
    assert_eq!(session.profiles().len(), 2);
}

#[tokio::test]
async fn sync_failure_does_not_undo_local_profile() {
    let harness = SessionHarness::new();
    let sync = Arc::new(RecordingSync {
        fail: true,
        ..RecordingSync::default()
    });
    let session = harness.open(
        Collaborators::new(Arc::new(StubEnrichment::new("stub-bio", 350.0))).with_sync(sync),
    );

    let outcome = session.submit_profile(jane_doe_form()).await.unwrap();
    assert!(matches!(outcome.sync, SyncOutcome::Failed(_)));
    assert_eq!(session.profiles().len(), 1);
    assert_eq!(session.profiles()[0].id, outcome.profile.id);
}

#[tokio::test]
async fn successful_sync_mirrors_the_new_profile() {
    let harness = SessionHarness::new();
    let sync = Arc::new(RecordingSync::default());
    let session = harness.open(
        Collaborators::new(Arc::new(StubEnrichment::new("stub-bio", 350.0)))
            .with_sync(sync.clone()),
    );

    let outcome = session.submit_profile(jane_doe_form()).await.unwrap();
    assert_eq!(outcome.sync, SyncOutcome::Synced);
    assert_eq!(*sync.synced.lock(), vec![outcome.profile.id]);
}

#[tokio::test]
async fn repeated_submissions_get_unique_ids() {
    let harness = SessionHarness::new();
    let session = harness.open_with(StubEnrichment::new("stub-bio", 350.0));
    for _ in 0..20 {
        session.submit_profile(jane_doe_form()).await.unwrap();
    }
    let ids: HashSet<_> = session.profiles().into_iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), 20);
}

#[tokio::test]
async fn ids_stay_unique_across_sessions() {
    let harness = SessionHarness::new();
    let first = harness.open_with(StubEnrichment::new("stub-bio", 350.0));
    let earlier = first.submit_profile(jane_doe_form()).await.unwrap().profile.id;
    drop(first);

    let second = harness.open_with(StubEnrichment::new("stub-bio", 350.0));
    let later = second.submit_profile(jane_doe_form()).await.unwrap().profile.id;
    assert!(later.parse::<u64>().unwrap() > earlier.parse::<u64>().unwrap());
}

#[tokio::test]
async fn custom_schedule_is_stored_verbatim() {
    let harness = SessionHarness::new();
    let session = harness.open_with(StubEnrichment::new("stub-bio", 350.0));
    let hours = vec![
        FlexibleHour::new("Wednesday", "06:00", "10:00", true),
        FlexibleHour::new("Wednesday", "09:00", "13:00", true),
    ];
    let mut form = jane_doe_form();
    form.availability = "Flexible hours (set custom schedule)".into();
    form.flexible_hours = Some(hours.clone());

    let outcome = session.submit_profile(form).await.unwrap();
    assert_eq!(outcome.profile.availability, hours);
}

#[tokio::test]
async fn loading_is_reported_while_submission_is_in_flight() {
    let harness = SessionHarness::new();
    let gate = Arc::new(Notify::new());
    let session = harness.open_with(StubEnrichment::gated(gate.clone()));
    assert!(!session.loading());

    let observe = async {
        tokio::task::yield_now().await;
        let busy = session.loading();
        gate.notify_one();
        busy
    };
    let (result, busy_during) = tokio::join!(session.submit_profile(jane_doe_form()), observe);

    assert!(busy_during);
    let outcome = result.unwrap();
    assert!(!session.loading());

    let tracker = session.tracker();
    assert_eq!(
        tracker.state(&outcome.operation_id),
        Some(OperationState::Succeeded)
    );
    assert_eq!(tracker.recent()[0].kind, OperationKind::Submission);
}
