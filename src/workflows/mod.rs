//! Profile workflows: submission, bio regeneration and their loading state.

pub mod regenerate;
pub mod submission;
pub mod tracker;

pub use regenerate::{RegenerationOutcome, RegenerationWorkflow};
pub use submission::{
    ImageOutcome, ProfileForm, SubmissionError, SubmissionOutcome, SubmissionWorkflow,
    SyncOutcome,
};
pub use tracker::{OperationKind, OperationRecord, OperationState, OperationTracker};
