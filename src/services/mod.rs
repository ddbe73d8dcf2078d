//! External collaborators consumed by the profile workflows.

pub mod ai;
pub mod error;
pub mod image;
pub mod sync;

pub use ai::{template_bio, EnrichmentClient, EnrichmentRequest};
pub use error::{ServiceError, ServiceResult};
pub use image::{DataUrlEncoder, ImageEncoder, ImagePayload};
pub use sync::RemoteSyncClient;
