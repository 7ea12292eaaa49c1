use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient};
use tracing::{debug, instrument, warn};

use crate::domain::errors::IamError;
use crate::domain::models::{ApiKey, IamTokens, IbmCloudConfig};
use crate::domain::ports::TokenProvider;
use crate::infrastructure::logging::SecretScrubber;

const TOKEN_PATH: &str = "/identity/token";
const APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Configuration for the IAM HTTP client
#[derive(Debug, Clone)]
pub struct IamClientConfig {
    /// Base URL of the IAM identity service
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for IamClientConfig {
    fn default() -> Self {
        Self::from(&IbmCloudConfig::default())
    }
}

impl From<&IbmCloudConfig> for IamClientConfig {
    fn from(config: &IbmCloudConfig) -> Self {
        Self {
            base_url: config.iam_url.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

/// HTTP client for the IBM Cloud IAM API key grant
///
/// Every call performs a fresh exchange; tokens are not cached.
pub struct IamClient {
    http_client: ReqwestClient,
    token_url: String,
    scrubber: SecretScrubber,
}

impl IamClient {
    pub fn new(config: IamClientConfig) -> Result<Self, IamError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            token_url: format!("{}{}", config.base_url.trim_end_matches('/'), TOKEN_PATH),
            scrubber: SecretScrubber::new(),
        })
    }
}

#[async_trait]
impl TokenProvider for IamClient {
    #[instrument(skip(self, api_key))]
    async fn get_tokens(&self, api_key: &ApiKey) -> Result<IamTokens, IamError> {
        debug!("POST {}", self.token_url);
        let response = self
            .http_client
            .post(&self.token_url)
            .form(&[("grant_type", APIKEY_GRANT_TYPE), ("apikey", api_key.expose())])
            .send()
            .await?;

        let status = response.status();
        debug!("IAM response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            let body = self.scrubber.scrub_message(&body);
            warn!("IAM token exchange failed ({}): {}", status, body);
            return Err(IamError::from_status(status, body));
        }

        let tokens: IamTokens = serde_json::from_str(&body)?;
        if tokens.access_token.is_empty() {
            return Err(IamError::MissingAccessToken);
        }

        debug!(
            token_type = tokens.token_type.as_deref().unwrap_or("unknown"),
            expires_in = tokens.expires_in,
            "IAM token obtained"
        );

        Ok(tokens)
    }
}
