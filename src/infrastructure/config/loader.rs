use std::collections::HashSet;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use reqwest::Url;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid {name} URL '{url}': {reason}")]
    InvalidUrl {
        name: &'static str,
        url: String,
        reason: String,
    },

    #[error("Account identifiers cannot be empty")]
    EmptyAccount,

    #[error("Account '{0}' is listed more than once")]
    DuplicateAccount(String),

    #[error("Locker path cannot be empty")]
    EmptyLockerPath,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .evidence/config.yaml (project config)
    /// 3. .evidence/local.yaml (local overrides, optional)
    /// 4. Environment variables (EVIDENCE_* prefix, `__` separates nested keys)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment()
            .merge(Yaml::file(".evidence/config.yaml"))
            .merge(Yaml::file(".evidence/local.yaml"))
            .merge(Self::env())
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring environment overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Self::figment()
            .merge(Yaml::file(path.as_ref()))
            .merge(Self::env())
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment() -> Figment {
        Figment::new().merge(Serialized::defaults(Config::default()))
    }

    fn env() -> Env {
        // EVIDENCE_CREDS_* belongs to the credentials loader
        Env::prefixed("EVIDENCE_")
            .ignore(&["config"])
            .filter(|key| !key.as_str().to_ascii_lowercase().starts_with("creds_"))
            .split("__")
    }

    /// Validate configuration after loading
    ///
    /// A missing account list is not an error here: the fetcher reports it
    /// when it runs.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.ibm_cloud.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.ibm_cloud.timeout_secs));
        }

        validate_url("containers", &config.ibm_cloud.containers_url)?;
        validate_url("iam", &config.ibm_cloud.iam_url)?;

        if let Some(accounts) = config.accounts() {
            let mut seen = HashSet::new();
            for account in accounts {
                if account.trim().is_empty() {
                    return Err(ConfigError::EmptyAccount);
                }
                if !seen.insert(account.as_str()) {
                    return Err(ConfigError::DuplicateAccount(account.clone()));
                }
            }
        }

        if config.locker.path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyLockerPath);
        }

        Ok(())
    }
}

fn validate_url(name: &'static str, url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        name,
        url: url.to_string(),
        reason,
    };

    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}
