//! CLI type definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ibmcloud-evidence")]
#[command(about = "Collect IBM Cloud cluster list compliance evidence", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .evidence/config.yaml + .evidence/local.yaml)
    #[arg(short, long, global = true, env = "EVIDENCE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the cluster list of every configured account and store it as evidence
    Fetch(FetchArgs),

    /// Print the stored cluster list evidence
    Show(ShowArgs),

    /// List configured accounts and whether their API keys resolve
    Accounts,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Evidence locker directory (overrides locker.path)
    #[arg(long)]
    pub locker: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Evidence locker directory (overrides locker.path)
    #[arg(long)]
    pub locker: Option<PathBuf>,
}
