use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::domain::errors::EvidenceError;
use crate::domain::models::{EvidencePath, LockerConfig};
use crate::domain::ports::EvidenceStore;

const RAW_DIR: &str = "raw";
const INDEX_FILE: &str = "index.json";

/// Metadata kept for each evidence file in its category's `index.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub last_update: DateTime<Utc>,
    /// Seconds the evidence stays fresh
    pub ttl: u64,
}

impl IndexEntry {
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        let ttl = i64::try_from(self.ttl).unwrap_or(i64::MAX);
        now.signed_duration_since(self.last_update).num_seconds() > ttl
    }
}

/// Evidence locker on the local filesystem
///
/// Raw evidence lands at `<root>/raw/<path>`; each category directory keeps
/// an `index.json` mapping file names to [`IndexEntry`] metadata.
#[derive(Debug, Clone)]
pub struct LocalLocker {
    root: PathBuf,
    ttl_secs: u64,
}

impl LocalLocker {
    pub fn new(root: impl Into<PathBuf>, ttl_secs: u64) -> Self {
        Self {
            root: root.into(),
            ttl_secs,
        }
    }

    pub fn from_config(config: &LockerConfig) -> Self {
        Self::new(config.path.clone(), config.ttl_secs)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location of a piece of raw evidence
    pub fn raw_evidence_path(&self, path: &EvidencePath) -> PathBuf {
        self.root.join(RAW_DIR).join(path.as_str())
    }

    fn index_path(&self, path: &EvidencePath) -> PathBuf {
        self.root.join(RAW_DIR).join(path.category()).join(INDEX_FILE)
    }

    /// Read stored raw evidence back
    pub async fn read_raw_evidence(&self, path: &EvidencePath) -> Result<String, EvidenceError> {
        let file = self.raw_evidence_path(path);
        fs::read_to_string(&file)
            .await
            .map_err(|source| EvidenceError::Io { path: file, source })
    }

    /// Metadata recorded for a piece of evidence, if it was ever stored
    pub async fn index_entry(
        &self,
        path: &EvidencePath,
    ) -> Result<Option<IndexEntry>, EvidenceError> {
        let mut index = read_index(&self.index_path(path)).await?;
        Ok(index.remove(path.file_name()))
    }

    async fn update_index(
        &self,
        path: &EvidencePath,
        mut index: BTreeMap<String, IndexEntry>,
    ) -> Result<(), EvidenceError> {
        index.insert(
            path.file_name().to_string(),
            IndexEntry {
                last_update: Utc::now(),
                ttl: self.ttl_secs,
            },
        );

        let content = serde_json::to_string_pretty(&index)?;
        write_file(&self.index_path(path), &content).await
    }
}

#[async_trait]
impl EvidenceStore for LocalLocker {
    #[instrument(skip(self, content))]
    async fn store_raw_evidence(
        &self,
        path: &EvidencePath,
        content: &str,
    ) -> Result<(), EvidenceError> {
        // A corrupt index must fail the store before the artifact is replaced
        let index = read_index(&self.index_path(path)).await?;

        let target = self.raw_evidence_path(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| EvidenceError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        write_file(&target, content).await?;
        self.update_index(path, index).await?;

        info!(evidence = %path, file = %target.display(), "raw evidence stored");
        Ok(())
    }
}

async fn read_index(index_path: &Path) -> Result<BTreeMap<String, IndexEntry>, EvidenceError> {
    match fs::read_to_string(index_path).await {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(source) => Err(EvidenceError::Io {
            path: index_path.to_path_buf(),
            source,
        }),
    }
}

async fn write_file(path: &Path, content: &str) -> Result<(), EvidenceError> {
    debug!(file = %path.display(), "writing");
    fs::write(path, content)
        .await
        .map_err(|source| EvidenceError::Io {
            path: path.to_path_buf(),
            source,
        })
}
