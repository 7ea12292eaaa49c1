//! IBM Cloud cluster list fetcher.
//!
//! Lists the Kubernetes clusters of every configured IBM Cloud account and
//! records the raw responses, keyed by account, as one evidence file.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{error, info, instrument};

use crate::domain::errors::{FetchError, FetchResult};
use crate::domain::models::{
    api_key_name, ClusterList, Config, Credentials, EvidencePath, ACCOUNTS_SETTING,
    IBM_CLOUD_PROVIDER,
};
use crate::domain::ports::{EvidenceStore, TokenProvider};
use crate::infrastructure::containers::ContainersSession;

/// Fetches the cluster list of each configured account
///
/// Lifecycle: [`set_up`](Self::set_up) opens the session,
/// [`fetch_cluster_list`](Self::fetch_cluster_list) may run any number of
/// times, [`tear_down`](Self::tear_down) releases the session. Dropping the
/// fetcher tears it down as well.
pub struct ClusterListFetcher {
    config: Arc<Config>,
    credentials: Arc<Credentials>,
    token_provider: Arc<dyn TokenProvider>,
    session: Option<ContainersSession>,
}

impl ClusterListFetcher {
    /// Open the Kubernetes Service API session
    pub fn set_up(
        config: Arc<Config>,
        credentials: Arc<Credentials>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> FetchResult<Self> {
        let session = ContainersSession::open(
            &config.ibm_cloud.containers_url,
            Duration::from_secs(config.ibm_cloud.timeout_secs),
        )?;

        Ok(Self {
            config,
            credentials,
            token_provider,
            session: Some(session),
        })
    }

    /// Release the session; later calls are no-ops
    pub fn tear_down(&mut self) {
        if let Some(session) = self.session.take() {
            session.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    fn session(&self) -> FetchResult<&ContainersSession> {
        self.session.as_ref().ok_or(FetchError::SessionClosed)
    }

    /// Fetch the cluster list of every configured account
    ///
    /// Accounts are processed one at a time in configuration order. The first
    /// failure aborts the whole fetch.
    ///
    /// # Returns
    /// * `Ok(String)` - JSON object mapping each account to its raw response body
    /// * `Err(FetchError)` - configuration, token exchange, HTTP or decode failure
    #[instrument(skip(self))]
    pub async fn fetch_cluster_list(&self) -> FetchResult<String> {
        let session = self.session()?;
        let accounts = self.accounts()?;

        let mut cluster_list = ClusterList::new();
        for account in accounts {
            let body = self.get_cluster_list(session, account).await?;
            cluster_list.insert(account.clone(), body);
        }

        info!(accounts = cluster_list.len(), "cluster list fetched");
        cluster_list.to_json()
    }

    fn accounts(&self) -> FetchResult<&[String]> {
        let accounts = self
            .config
            .accounts()
            .ok_or_else(|| FetchError::MissingSetting(ACCOUNTS_SETTING.to_string()))?;

        let mut seen = HashSet::new();
        for account in accounts {
            if account.trim().is_empty() {
                return Err(FetchError::InvalidSetting {
                    setting: ACCOUNTS_SETTING.to_string(),
                    reason: "account identifiers cannot be blank".to_string(),
                });
            }
            if !seen.insert(account.as_str()) {
                return Err(FetchError::InvalidSetting {
                    setting: ACCOUNTS_SETTING.to_string(),
                    reason: format!("account '{account}' is listed more than once"),
                });
            }
        }

        Ok(accounts)
    }

    #[instrument(skip(self, session))]
    async fn get_cluster_list(
        &self,
        session: &ContainersSession,
        account: &str,
    ) -> FetchResult<Value> {
        let api_key = self
            .credentials
            .api_key(IBM_CLOUD_PROVIDER, &api_key_name(account))?;
        let tokens = self.token_provider.get_tokens(api_key).await?;

        session.list_clusters(account, &tokens.access_token).await
    }
}

impl Drop for ClusterListFetcher {
    fn drop(&mut self) {
        self.tear_down();
    }
}

/// Evidence written by a successful run
#[derive(Debug, Clone)]
pub struct StoredEvidence {
    pub path: EvidencePath,
    pub content: String,
}

/// Run the fetcher once and persist its output
///
/// Sets up the fetcher, fetches, always tears down, then hands the payload to
/// `store` under `ibm_cloud/cluster_list.json`. The store is not called when
/// the fetch fails.
#[instrument(skip_all)]
pub async fn run_cluster_list_fetch(
    config: Arc<Config>,
    credentials: Arc<Credentials>,
    token_provider: Arc<dyn TokenProvider>,
    store: &dyn EvidenceStore,
) -> FetchResult<StoredEvidence> {
    let mut fetcher = ClusterListFetcher::set_up(config, credentials, token_provider)?;
    let result = fetcher.fetch_cluster_list().await;
    fetcher.tear_down();

    let content = result.inspect_err(|err| error!("cluster list fetch failed: {}", err))?;

    let path = EvidencePath::cluster_list();
    store.store_raw_evidence(&path, &content).await?;

    Ok(StoredEvidence { path, content })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::IamError;
    use crate::domain::models::{ApiKey, BearerToken, IamTokens};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Token provider that records which keys it was asked to exchange
    #[derive(Default)]
    struct RecordingTokenProvider {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TokenProvider for RecordingTokenProvider {
        async fn get_tokens(&self, api_key: &ApiKey) -> Result<IamTokens, IamError> {
            self.calls.lock().unwrap().push(api_key.expose().to_string());
            Ok(IamTokens {
                access_token: BearerToken::new(format!("token-for-{}", api_key.expose())),
                token_type: Some("Bearer".to_string()),
                expires_in: Some(3600),
                expiration: None,
                scope: None,
            })
        }
    }

    fn config_with(accounts: Option<Vec<&str>>) -> Arc<Config> {
        let mut config = Config::default();
        config.org.ibm_cloud.accounts =
            accounts.map(|list| list.into_iter().map(String::from).collect());
        // Nothing listens here; tests below never reach the network
        config.ibm_cloud.containers_url = "http://127.0.0.1:9".to_string();
        Arc::new(config)
    }

    fn fetcher(config: Arc<Config>, provider: Arc<RecordingTokenProvider>) -> ClusterListFetcher {
        ClusterListFetcher::set_up(config, Arc::new(Credentials::new()), provider).unwrap()
    }

    #[tokio::test]
    async fn test_empty_account_list_yields_empty_object() {
        let provider = Arc::new(RecordingTokenProvider::default());
        let fetcher = fetcher(config_with(Some(vec![])), provider.clone());

        assert_eq!(fetcher.fetch_cluster_list().await.unwrap(), "{}");
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_account_list() {
        let provider = Arc::new(RecordingTokenProvider::default());
        let fetcher = fetcher(config_with(None), provider);

        match fetcher.fetch_cluster_list().await {
            Err(FetchError::MissingSetting(setting)) => assert_eq!(setting, "org.ibm_cloud.accounts"),
            other => panic!("Expected MissingSetting, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_token_exchange() {
        let provider = Arc::new(RecordingTokenProvider::default());
        let fetcher = fetcher(config_with(Some(vec!["acct1"])), provider.clone());

        match fetcher.fetch_cluster_list().await {
            Err(FetchError::MissingCredential { provider, key }) => {
                assert_eq!(provider, "ibm_cloud");
                assert_eq!(key, "acct1_api_key");
            }
            other => panic!("Expected MissingCredential, got {other:?}"),
        }
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_accounts_rejected() {
        let provider = Arc::new(RecordingTokenProvider::default());
        let fetcher = fetcher(config_with(Some(vec!["acct1", "acct1"])), provider);

        assert!(matches!(
            fetcher.fetch_cluster_list().await,
            Err(FetchError::InvalidSetting { .. })
        ));
    }

    #[tokio::test]
    async fn test_blank_account_rejected() {
        let provider = Arc::new(RecordingTokenProvider::default());
        let fetcher = fetcher(config_with(Some(vec!["acct1", "  "])), provider.clone());

        match fetcher.fetch_cluster_list().await {
            Err(FetchError::InvalidSetting { setting, .. }) => {
                assert_eq!(setting, "org.ibm_cloud.accounts");
            }
            other => panic!("Expected InvalidSetting, got {other:?}"),
        }
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_after_tear_down() {
        let provider = Arc::new(RecordingTokenProvider::default());
        let mut fetcher = fetcher(config_with(Some(vec![])), provider);

        fetcher.tear_down();
        assert!(!fetcher.is_open());
        // Second tear down is a no-op
        fetcher.tear_down();

        assert!(matches!(
            fetcher.fetch_cluster_list().await,
            Err(FetchError::SessionClosed)
        ));
    }
}
