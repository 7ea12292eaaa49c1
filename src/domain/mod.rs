//! Domain layer for the cluster-list evidence fetcher
//!
//! This module contains the evidence data model, the error taxonomy and the
//! ports that infrastructure adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{EvidenceError, FetchError, FetchResult, IamError};
