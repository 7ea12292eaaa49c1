//! Common test utilities for integration tests
//!
//! Provides mock IBM Cloud endpoints, config builders and an in-memory
//! evidence store shared across integration test files.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ibmcloud_evidence::domain::models::{ApiKey, Config, Credentials, EvidencePath};
use ibmcloud_evidence::infrastructure::iam::{IamClient, IamClientConfig};
use ibmcloud_evidence::{EvidenceError, EvidenceStore};
use serde_json::Value;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Evidence store that keeps every call in memory
#[derive(Default)]
pub struct MemoryEvidenceStore {
    pub stored: Mutex<Vec<(EvidencePath, String)>>,
}

impl MemoryEvidenceStore {
    pub fn calls(&self) -> usize {
        self.stored.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<(EvidencePath, String)> {
        self.stored.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl EvidenceStore for MemoryEvidenceStore {
    async fn store_raw_evidence(
        &self,
        path: &EvidencePath,
        content: &str,
    ) -> Result<(), EvidenceError> {
        self.stored
            .lock()
            .unwrap()
            .push((path.clone(), content.to_string()));
        Ok(())
    }
}

/// Config pointing both IBM Cloud services at `server`
pub fn test_config(server: &MockServer, accounts: &[&str]) -> Arc<Config> {
    let mut config = Config::default();
    config.org.ibm_cloud.accounts = Some(accounts.iter().map(|a| (*a).to_string()).collect());
    config.ibm_cloud.containers_url = server.uri();
    config.ibm_cloud.iam_url = server.uri();
    config.ibm_cloud.timeout_secs = 5;
    Arc::new(config)
}

/// Credentials holding `<account>_api_key = key-<account>` for each account
pub fn test_credentials(accounts: &[&str]) -> Arc<Credentials> {
    let mut credentials = Credentials::new();
    for account in accounts {
        credentials.insert(
            "ibm_cloud",
            format!("{account}_api_key"),
            ApiKey::new(format!("key-{account}")),
        );
    }
    Arc::new(credentials)
}

pub fn iam_client(server: &MockServer) -> Arc<IamClient> {
    Arc::new(
        IamClient::new(IamClientConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        })
        .unwrap(),
    )
}

/// IAM grant for `api_key` answering with `access_token`
pub async fn mock_iam_token(server: &MockServer, api_key: &str, access_token: &str) {
    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .and(header("accept", "application/json"))
        .and(body_string_contains("grant_type=urn%3Aibm%3Aparams%3Aoauth%3Agrant-type%3Aapikey"))
        .and(body_string_contains(format!("apikey={api_key}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": access_token,
            "refresh_token": "refresh",
            "token_type": "Bearer",
            "expires_in": 3600,
            "expiration": 1_700_003_600,
            "scope": "ibm openid"
        })))
        .mount(server)
        .await;
}

/// Cluster list answered for requests carrying `access_token`
pub async fn mock_clusters(server: &MockServer, access_token: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path("/global/v1/clusters"))
        .and(header("accept", "application/json"))
        .and(header("authorization", format!("Bearer {access_token}").as_str()))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}
