//! Domain errors for the evidence fetcher.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while producing the cluster-list evidence.
///
/// Every variant is fatal to a fetch: nothing is retried and no partial
/// evidence is emitted.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Missing configuration setting: {0}")]
    MissingSetting(String),

    #[error("Invalid configuration setting {setting}: {reason}")]
    InvalidSetting { setting: String, reason: String },

    #[error("Missing credential '{key}' in section '{provider}'")]
    MissingCredential { provider: String, key: String },

    #[error("Token exchange failed: {0}")]
    TokenExchange(#[from] IamError),

    #[error("Cluster list request for account '{account}' failed with HTTP {status}: {body}")]
    HttpStatus {
        account: String,
        status: StatusCode,
        body: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed cluster list response for account '{account}': {source}")]
    Decode {
        account: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize cluster list: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Failed to open HTTP session: {0}")]
    Session(String),

    #[error("HTTP session is closed")]
    SessionClosed,

    #[error("Evidence store error: {0}")]
    Evidence(#[from] EvidenceError),
}

impl FetchError {
    /// True when the fetch failed because of local configuration or credentials.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingSetting(_) | Self::InvalidSetting { .. } | Self::MissingCredential { .. }
        )
    }

    /// True when a remote service refused the credentials or token.
    pub fn is_authentication(&self) -> bool {
        match self {
            Self::TokenExchange(err) => err.is_rejection(),
            Self::HttpStatus { status, .. } => {
                *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
            }
            _ => false,
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Errors returned by the IAM token exchange.
#[derive(Debug, Error)]
pub enum IamError {
    /// The identity service rejected the request (HTTP 4xx), usually a bad API key
    #[error("IAM rejected the API key ({status}): {body}")]
    Rejected { status: StatusCode, body: String },

    /// The identity service failed (HTTP 5xx or unexpected status)
    #[error("IAM server error ({status}): {body}")]
    ServerError { status: StatusCode, body: String },

    #[error("IAM network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed IAM token response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("IAM token response did not contain an access token")]
    MissingAccessToken,
}

impl IamError {
    /// Create error from HTTP status code and response body
    pub fn from_status(status: StatusCode, body: String) -> Self {
        if status.is_client_error() {
            Self::Rejected { status, body }
        } else {
            Self::ServerError { status, body }
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Errors from the evidence store.
#[derive(Debug, Error)]
pub enum EvidenceError {
    #[error("Invalid evidence path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Evidence I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Evidence index error: {0}")]
    Serialization(#[from] serde_json::Error),
}
