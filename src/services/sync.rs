use async_trait::async_trait;

use super::error::ServiceResult;
use crate::profiles::model::LocalProfile;

/// Mirrors profiles to an external tabular store (e.g. a spreadsheet).
#[async_trait]
pub trait RemoteSyncClient: Send + Sync {
    async fn add_profile(&self, profile: &LocalProfile) -> ServiceResult<()>;
}
