pub mod billing;
pub mod config;
pub mod logging;
pub mod profiles;
pub mod services;
pub mod session;
pub mod storage;
pub mod workflows;

// Re-export commonly used types for convenience.
pub use config::AppConfig;
pub use profiles::{FlexibleHour, LocalProfile, ProfilePatch, ProfileStatus, ProfileStore};
pub use session::{Collaborators, ProfileSession};
pub use workflows::{ProfileForm, RegenerationOutcome, SubmissionError, SubmissionOutcome};
