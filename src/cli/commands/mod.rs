//! CLI command implementations.

pub mod accounts;
pub mod fetch;
pub mod show;
