use localpros::profiles::ProfileStatus;
use localpros::services::template_bio;
use localpros::RegenerationOutcome;

use crate::support::{jane_doe_form, SessionHarness, StubEnrichment};

#[tokio::test]
async fn regeneration_replaces_bio_with_template() {
    let harness = SessionHarness::new();
    let session = harness.open_with(StubEnrichment::new("stub-bio", 350.0));
    let id = session.submit_profile(jane_doe_form()).await.unwrap().profile.id;

    let outcome = session.regenerate_ai_content(&id).await;
    assert!(matches!(outcome, RegenerationOutcome::Regenerated(_)));

    let stored = harness
        .open_with(StubEnrichment::new("unused", 0.0))
        .profile(&id)
        .unwrap();
    assert_eq!(stored.status, ProfileStatus::Ready);
    assert_eq!(
        stored.bio_ai.unwrap(),
        "Professional Plumbing with 5 years of experience in Cape Town. Skilled in delivering \
         high-quality services with attention to detail and customer satisfaction."
    );
    assert_eq!(stored.suggested_price_zar, 350.0);
    assert_eq!(
        template_bio(&stored.skill, stored.years_experience, &stored.location),
        template_bio("Plumbing", 5.0, "Cape Town")
    );
}

#[tokio::test]
async fn regeneration_of_unknown_id_changes_nothing() {
    let harness = SessionHarness::new();
    let session = harness.open_with(StubEnrichment::new("stub-bio", 350.0));
    session.submit_profile(jane_doe_form()).await.unwrap();
    let before = session.profiles();

    let outcome = session.regenerate_ai_content("404").await;
    assert_eq!(outcome, RegenerationOutcome::NotFound);
    assert_eq!(session.profiles(), before);
    assert!(!session.loading());
}
