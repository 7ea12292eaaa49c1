use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use tracing::debug;

use crate::domain::models::{Credentials, IBM_CLOUD_PROVIDER};

/// Environment prefix for credentials, e.g. `EVIDENCE_CREDS_IBM_CLOUD__ACCT1_API_KEY`
pub const CREDENTIALS_ENV_PREFIX: &str = "EVIDENCE_CREDS_";

/// Loads the credential store
pub struct CredentialsLoader;

impl CredentialsLoader {
    /// Load credentials
    ///
    /// Precedence (lowest to highest):
    /// 1. YAML credentials file, if a path is given (a missing file is empty)
    /// 2. Environment variables (EVIDENCE_CREDS_<SECTION>__<KEY>)
    ///
    /// File layout:
    /// ```yaml
    /// ibm_cloud:
    ///   acct1_api_key: <key>
    /// ```
    pub fn load(path: Option<&Path>) -> Result<Credentials> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }

        let credentials: Credentials = figment
            .merge(Env::prefixed(CREDENTIALS_ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to load credentials")?;

        debug!(
            file = ?path,
            ibm_cloud_keys = credentials.keys(IBM_CLOUD_PROVIDER).len(),
            "credentials loaded"
        );

        Ok(credentials)
    }
}
