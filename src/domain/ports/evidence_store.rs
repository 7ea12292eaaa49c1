use async_trait::async_trait;

use crate::domain::errors::EvidenceError;
use crate::domain::models::EvidencePath;

/// Persists raw evidence produced by fetchers
#[async_trait]
pub trait EvidenceStore: Send + Sync {
    /// Store `content` under the logical `path`, replacing earlier content
    async fn store_raw_evidence(
        &self,
        path: &EvidencePath,
        content: &str,
    ) -> Result<(), EvidenceError>;
}
