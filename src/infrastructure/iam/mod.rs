//! IBM Cloud IAM token exchange

pub mod client;

pub use client::{IamClient, IamClientConfig};
