//! Implementation of the `accounts` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, table, CommandOutput};
use crate::domain::models::{api_key_name, Config, IBM_CLOUD_PROVIDER};
use crate::infrastructure::credentials::CredentialsLoader;

#[derive(Debug, Serialize)]
pub struct AccountStatus {
    pub account: String,
    pub credential: String,
    pub credential_found: bool,
}

#[derive(Debug, Serialize)]
pub struct AccountsOutput {
    pub configured: bool,
    pub accounts: Vec<AccountStatus>,
}

impl CommandOutput for AccountsOutput {
    fn to_human(&self) -> String {
        if !self.configured {
            return "No accounts configured (org.ibm_cloud.accounts is not set)".to_string();
        }
        if self.accounts.is_empty() {
            return "Account list is empty".to_string();
        }

        let rows = self
            .accounts
            .iter()
            .map(|status| {
                vec![
                    status.account.clone(),
                    status.credential.clone(),
                    if status.credential_found { "yes" } else { "missing" }.to_string(),
                ]
            })
            .collect();
        table(&["Account", "Credential", "Found"], rows)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let credentials = CredentialsLoader::load(config.credentials_path.as_deref())?;

    let accounts = config
        .accounts()
        .unwrap_or_default()
        .iter()
        .map(|account| {
            let credential = api_key_name(account);
            AccountStatus {
                account: account.clone(),
                credential_found: credentials.contains(IBM_CLOUD_PROVIDER, &credential),
                credential,
            }
        })
        .collect();

    let output_data = AccountsOutput {
        configured: config.accounts().is_some(),
        accounts,
    };
    output(&output_data, json_mode);

    Ok(())
}
