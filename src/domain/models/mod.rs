pub mod config;
pub mod credentials;
pub mod evidence;

pub use config::{
    Config, IbmCloudConfig, LockerConfig, LogFormat, LoggingConfig, OrgConfig, OrgIbmCloudConfig,
    RotationPolicy, ACCOUNTS_SETTING,
};
pub use credentials::{api_key_name, ApiKey, BearerToken, Credentials, IamTokens, IBM_CLOUD_PROVIDER};
pub use evidence::{ClusterList, EvidencePath, CLUSTER_LIST_EVIDENCE};
