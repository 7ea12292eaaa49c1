//! ibmcloud-evidence - IBM Cloud cluster list evidence fetcher
//!
//! Collects the Kubernetes cluster list of every configured IBM Cloud account
//! and stores the raw API responses, keyed by account, as compliance evidence
//! under `ibm_cloud/cluster_list.json`.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): evidence model, error taxonomy and ports
//! - **Service Layer** (`services`): the cluster list fetcher and its runner
//! - **Infrastructure Layer** (`infrastructure`): config, credentials, IAM,
//!   Kubernetes Service API session, evidence locker, logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ibmcloud_evidence::infrastructure::config::ConfigLoader;
//! use ibmcloud_evidence::infrastructure::credentials::CredentialsLoader;
//! use ibmcloud_evidence::infrastructure::evidence::LocalLocker;
//! use ibmcloud_evidence::infrastructure::iam::{IamClient, IamClientConfig};
//! use ibmcloud_evidence::services::run_cluster_list_fetch;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let credentials = CredentialsLoader::load(config.credentials_path.as_deref())?;
//!     let iam = IamClient::new(IamClientConfig::from(&config.ibm_cloud))?;
//!     let locker = LocalLocker::from_config(&config.locker);
//!
//!     let stored =
//!         run_cluster_list_fetch(Arc::new(config), Arc::new(credentials), Arc::new(iam), &locker)
//!             .await?;
//!     println!("stored {}", stored.path);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{EvidenceError, FetchError, IamError};
pub use domain::models::{ClusterList, Config, Credentials, EvidencePath};
pub use domain::ports::{EvidenceStore, TokenProvider};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{run_cluster_list_fetch, ClusterListFetcher};
