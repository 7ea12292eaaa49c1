use std::time::Duration;

use reqwest::{header, Client as ReqwestClient};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::domain::errors::FetchError;
use crate::domain::models::BearerToken;
use crate::infrastructure::logging::SecretScrubber;

/// Global cluster listing endpoint of the Kubernetes Service API
pub const CLUSTERS_PATH: &str = "/global/v1/clusters";

/// Pooled HTTP session bound to the Kubernetes Service API host
///
/// Every request carries `Accept: application/json`. The session is reused
/// across accounts and released with [`ContainersSession::close`].
#[derive(Debug)]
pub struct ContainersSession {
    http_client: ReqwestClient,
    base_url: String,
    scrubber: SecretScrubber,
}

impl ContainersSession {
    /// Open a session against `base_url`
    pub fn open(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(4)
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Session(e.to_string()))?;

        debug!(base_url, "containers session opened");

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            scrubber: SecretScrubber::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /global/v1/clusters` as the owner of `token`
    ///
    /// Any non-2xx status is an error; the body is returned as decoded JSON
    /// without interpretation.
    #[instrument(skip(self, token))]
    pub async fn list_clusters(
        &self,
        account: &str,
        token: &BearerToken,
    ) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.base_url, CLUSTERS_PATH);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token.expose())
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            let body = self.scrubber.scrub_message(&body);
            warn!("Cluster list request failed ({}): {}", status, body);
            return Err(FetchError::HttpStatus {
                account: account.to_string(),
                status,
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            account: account.to_string(),
            source,
        })
    }

    /// Release the session and its pooled connections
    pub fn close(self) {
        debug!(base_url = %self.base_url, "containers session closed");
    }
}
