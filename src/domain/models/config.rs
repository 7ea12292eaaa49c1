use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Dotted name of the account list setting, used in error messages
pub const ACCOUNTS_SETTING: &str = "org.ibm_cloud.accounts";

/// Main configuration structure for the evidence fetcher
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Organization settings (which accounts to collect from)
    #[serde(default)]
    pub org: OrgConfig,

    /// IBM Cloud service endpoints
    #[serde(default)]
    pub ibm_cloud: IbmCloudConfig,

    /// Evidence locker location
    #[serde(default)]
    pub locker: LockerConfig,

    /// Optional YAML credentials file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<PathBuf>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Configured accounts, if the list is present at all
    pub fn accounts(&self) -> Option<&[String]> {
        self.org.ibm_cloud.accounts.as_deref()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrgConfig {
    #[serde(default)]
    pub ibm_cloud: OrgIbmCloudConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrgIbmCloudConfig {
    /// Ordered account identifiers; evidence keys follow this order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<String>>,
}

/// IBM Cloud endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IbmCloudConfig {
    /// Base URL of the Kubernetes Service API
    #[serde(default = "default_containers_url")]
    pub containers_url: String,

    /// Base URL of the IAM identity service
    #[serde(default = "default_iam_url")]
    pub iam_url: String,

    /// Request timeout in seconds, applied to both services
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_containers_url() -> String {
    "https://containers.cloud.ibm.com".to_string()
}

fn default_iam_url() -> String {
    "https://iam.cloud.ibm.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for IbmCloudConfig {
    fn default() -> Self {
        Self {
            containers_url: default_containers_url(),
            iam_url: default_iam_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Evidence locker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LockerConfig {
    /// Root directory of the locker
    #[serde(default = "default_locker_path")]
    pub path: PathBuf,

    /// Seconds before stored evidence is considered stale
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_locker_path() -> PathBuf {
    PathBuf::from(".evidence/locker")
}

const fn default_ttl_secs() -> u64 {
    86_400
}

impl Default for LockerConfig {
    fn default() -> Self {
        Self {
            path: default_locker_path(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output format
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for log files (if None logs only to the console)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Enable console logging (stderr)
    #[serde(default = "default_true")]
    pub enable_console: bool,

    /// Log file rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    Daily,
    Hourly,
    #[default]
    Never,
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            enable_console: true,
            rotation: RotationPolicy::default(),
        }
    }
}
