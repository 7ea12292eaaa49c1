//! Service layer: evidence fetchers

pub mod cluster_list_fetcher;

pub use cluster_list_fetcher::{run_cluster_list_fetch, ClusterListFetcher, StoredEvidence};
