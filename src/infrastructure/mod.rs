//! Infrastructure layer module
//!
//! This module contains all infrastructure adapters and external integrations:
//! - Configuration management
//! - Credentials loading
//! - IAM token exchange
//! - Kubernetes Service API session
//! - Evidence locker
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod containers;
pub mod credentials;
pub mod evidence;
pub mod iam;
pub mod logging;
