//! AI enrichment seam: bio text and price suggestions for a profile.

use async_trait::async_trait;
use serde::Serialize;

use super::error::ServiceResult;

/// Inputs shared by both enrichment calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichmentRequest {
    pub skill: String,
    pub experience: f64,
    pub location: String,
}

impl EnrichmentRequest {
    pub fn new(skill: impl Into<String>, experience: f64, location: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            experience,
            location: location.into(),
        }
    }
}

/// Generates marketing text and a ZAR price for a provider.
///
/// Implementations may be slow; no timeout is applied by callers.
#[async_trait]
pub trait EnrichmentClient: Send + Sync {
    async fn generate_bio(&self, request: &EnrichmentRequest) -> ServiceResult<String>;
    async fn generate_pricing(&self, request: &EnrichmentRequest) -> ServiceResult<f64>;
}

/// Deterministic bio used when regenerating without a model call.
pub fn template_bio(skill: &str, years_experience: f64, location: &str) -> String {
    format!(
        "Professional {skill} with {years_experience} years of experience in {location}. \
         Skilled in delivering high-quality services with attention to detail and customer satisfaction."
    )
}
