//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - TokenProvider: IAM API key to bearer token exchange
//! - EvidenceStore: raw evidence persistence
//!
//! The fetcher only talks to these traits, so tests can swap in fakes.

pub mod evidence_store;
pub mod token_provider;

pub use evidence_store::EvidenceStore;
pub use token_provider::TokenProvider;
