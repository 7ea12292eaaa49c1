//! Implementation of the `show` command.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::ShowArgs;
use crate::domain::models::{Config, EvidencePath};
use crate::infrastructure::evidence::LocalLocker;

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub evidence: String,
    pub last_update: Option<String>,
    pub stale: bool,
    pub content: serde_json::Value,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let header = match &self.last_update {
            Some(last_update) if self.stale => {
                format!("{} (updated {last_update}, stale)", self.evidence)
            }
            Some(last_update) => format!("{} (updated {last_update})", self.evidence),
            None => self.evidence.clone(),
        };
        let body = serde_json::to_string_pretty(&self.content).unwrap_or_default();
        format!("{header}\n{body}")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: ShowArgs, config: Config, json_mode: bool) -> Result<()> {
    let locker = match args.locker {
        Some(path) => LocalLocker::new(path, config.locker.ttl_secs),
        None => LocalLocker::from_config(&config.locker),
    };
    let path = EvidencePath::cluster_list();

    let raw = locker
        .read_raw_evidence(&path)
        .await
        .context("No cluster list evidence found; run `fetch` first")?;
    let content = serde_json::from_str(&raw).context("Stored evidence is not valid JSON")?;
    let entry = locker.index_entry(&path).await?;

    let output_data = ShowOutput {
        evidence: path.to_string(),
        last_update: entry.as_ref().map(|e| e.last_update.to_rfc3339()),
        stale: entry.is_some_and(|e| e.is_stale(chrono::Utc::now())),
        content,
    };
    output(&output_data, json_mode);

    Ok(())
}
