//! ibmcloud-evidence CLI entry point.

use clap::Parser;

use ibmcloud_evidence::cli::{handle_error, Cli, Commands};
use ibmcloud_evidence::infrastructure::config::ConfigLoader;
use ibmcloud_evidence::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Fetch(args) => {
            ibmcloud_evidence::cli::commands::fetch::execute(args, config, cli.json).await
        }
        Commands::Show(args) => {
            ibmcloud_evidence::cli::commands::show::execute(args, config, cli.json).await
        }
        Commands::Accounts => ibmcloud_evidence::cli::commands::accounts::execute(&config, cli.json),
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
