//! Credentials management infrastructure
//!
//! API keys come from an optional YAML credentials file and from
//! `EVIDENCE_CREDS_*` environment variables.

pub mod loader;

pub use loader::CredentialsLoader;
