//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use crate::domain::errors::FetchError;

/// Print a command failure and exit with status 1
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let kind = match err.downcast_ref::<FetchError>() {
        Some(fetch_err) if fetch_err.is_configuration() => "configuration",
        Some(fetch_err) if fetch_err.is_authentication() => "authentication",
        Some(_) => "fetch",
        None => "error",
    };

    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "kind": kind,
            "error": format!("{err:#}"),
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error ({kind}): {err:#}");
    }

    std::process::exit(1);
}
