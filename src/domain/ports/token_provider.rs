use async_trait::async_trait;

use crate::domain::errors::IamError;
use crate::domain::models::{ApiKey, IamTokens};

/// Exchanges an API key for IAM tokens
///
/// Implementations perform one exchange per call; nothing is cached here.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Exchange `api_key` for a fresh set of tokens
    ///
    /// # Returns
    /// * `Ok(IamTokens)` - tokens containing a non-empty access token
    /// * `Err(IamError)` - rejected key, service failure or malformed response
    async fn get_tokens(&self, api_key: &ApiKey) -> Result<IamTokens, IamError>;
}
