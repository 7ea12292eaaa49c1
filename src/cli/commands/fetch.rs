//! Implementation of the `fetch` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, table, CommandOutput};
use crate::cli::types::FetchArgs;
use crate::domain::models::{ClusterList, Config};
use crate::infrastructure::credentials::CredentialsLoader;
use crate::infrastructure::evidence::LocalLocker;
use crate::infrastructure::iam::{IamClient, IamClientConfig};
use crate::services::run_cluster_list_fetch;

#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub account: String,
    /// None when the response body has no countable cluster array
    pub clusters: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct FetchOutput {
    pub success: bool,
    pub evidence: String,
    pub location: PathBuf,
    pub accounts: Vec<AccountSummary>,
}

impl CommandOutput for FetchOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Stored {} ({} account(s)) at {}",
            self.evidence,
            self.accounts.len(),
            self.location.display()
        )];

        if !self.accounts.is_empty() {
            let rows = self
                .accounts
                .iter()
                .map(|summary| {
                    vec![
                        summary.account.clone(),
                        summary
                            .clusters
                            .map_or_else(|| "-".to_string(), |count| count.to_string()),
                    ]
                })
                .collect();
            lines.push(table(&["Account", "Clusters"], rows));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: FetchArgs, mut config: Config, json_mode: bool) -> Result<()> {
    if let Some(locker) = args.locker {
        config.locker.path = locker;
    }

    let credentials = CredentialsLoader::load(config.credentials_path.as_deref())?;
    let iam = IamClient::new(IamClientConfig::from(&config.ibm_cloud))
        .context("Failed to build IAM client")?;
    let locker = LocalLocker::from_config(&config.locker);

    let stored = run_cluster_list_fetch(
        Arc::new(config),
        Arc::new(credentials),
        Arc::new(iam),
        &locker,
    )
    .await?;

    let cluster_list =
        ClusterList::from_json(&stored.content).context("Stored evidence is not a JSON object")?;
    let accounts = cluster_list
        .accounts()
        .map(|account| AccountSummary {
            account: account.to_string(),
            clusters: cluster_list.cluster_count(account),
        })
        .collect();

    let output_data = FetchOutput {
        success: true,
        evidence: stored.path.to_string(),
        location: locker.raw_evidence_path(&stored.path),
        accounts,
    };
    output(&output_data, json_mode);

    Ok(())
}
