//! IBM Cloud Kubernetes Service API access

pub mod session;

pub use session::{ContainersSession, CLUSTERS_PATH};
