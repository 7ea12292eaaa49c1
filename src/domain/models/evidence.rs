//! Evidence model: logical evidence paths and the aggregated cluster list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::errors::{EvidenceError, FetchError};

/// Logical name of the cluster list evidence
pub const CLUSTER_LIST_EVIDENCE: &str = "ibm_cloud/cluster_list.json";

/// Relative, slash-separated evidence location such as `ibm_cloud/cluster_list.json`
///
/// All segments before the last form the category; the last is the file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EvidencePath(String);

impl EvidencePath {
    pub fn new(path: impl Into<String>) -> Result<Self, EvidenceError> {
        let path = path.into();
        let invalid = |reason: &str| EvidenceError::InvalidPath {
            path: path.clone(),
            reason: reason.to_string(),
        };

        if path.is_empty() {
            return Err(invalid("path is empty"));
        }
        if path.starts_with('/') || path.contains('\\') {
            return Err(invalid("path must be relative and use '/' separators"));
        }
        if !path.contains('/') {
            return Err(invalid("path needs a category and a file name"));
        }
        for segment in path.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(invalid("path segments must be non-empty names"));
            }
        }

        Ok(Self(path))
    }

    /// The `ibm_cloud/cluster_list.json` evidence path
    pub fn cluster_list() -> Self {
        Self(CLUSTER_LIST_EVIDENCE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn category(&self) -> &str {
        self.0.rsplit_once('/').map_or("", |(category, _)| category)
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit_once('/').map_or(self.0.as_str(), |(_, name)| name)
    }
}

impl fmt::Display for EvidencePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EvidencePath {
    type Err = EvidenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EvidencePath {
    type Error = EvidenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EvidencePath> for String {
    fn from(path: EvidencePath) -> Self {
        path.0
    }
}

/// Cluster list responses keyed by account, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterList {
    accounts: Map<String, Value>,
}

impl ClusterList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the raw response body for an account
    pub fn insert(&mut self, account: impl Into<String>, body: Value) {
        self.accounts.insert(account.into(), body);
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn accounts(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }

    pub fn get(&self, account: &str) -> Option<&Value> {
        self.accounts.get(account)
    }

    /// Serialize to the evidence payload
    pub fn to_json(&self) -> Result<String, FetchError> {
        serde_json::to_string(&self.accounts).map_err(FetchError::Serialization)
    }

    /// Parse a stored evidence payload
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        let accounts: Map<String, Value> = serde_json::from_str(payload)?;
        Ok(Self { accounts })
    }

    /// Number of clusters reported for an account, when the body shape allows counting
    ///
    /// The global endpoint returns a bare array; wrapped `{"clusters": [...]}`
    /// bodies are also understood.
    pub fn cluster_count(&self, account: &str) -> Option<usize> {
        match self.accounts.get(account)? {
            Value::Array(items) => Some(items.len()),
            Value::Object(fields) => fields
                .get("clusters")
                .and_then(Value::as_array)
                .map(Vec::len),
            _ => None,
        }
    }
}
