use thiserror::Error;

/// Failures reported by external collaborators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("AI enrichment failed: {0}")]
    Enrichment(String),
    #[error("Remote sync failed: {0}")]
    Sync(String),
    #[error("Image encoding failed: {0}")]
    ImageEncoding(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
