use clap::Subcommand;
use serde_json::json;

use crate::cli::commands::client_for;
use crate::cli::config::CliConfig;
use crate::cli::utils;
use crate::cli::OutputFormat;
use crate::client::ApiClient;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Switch to another API server (persistent selection)")]
    Use {
        #[arg(help = "Server URL, e.g. http://localhost:5000")]
        url: String,
    },

    #[command(about = "Show currently selected server")]
    Show,

    #[command(about = "Check server health status from API /health endpoint")]
    Health,
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut config = CliConfig::load()?;

    match cmd {
        ServerCommands::Use { url } => {
            // reject garbage before persisting it
            let client = ApiClient::new(&url).map_err(utils::friendly)?;
            let url = client.base_url().to_string();

            let changed = config.server_url != url;
            config.server_url = url.clone();
            if changed {
                // tokens from one server mean nothing to another
                config.session = None;
            }
            config.save()?;

            utils::output_success(
                &output_format,
                &format!("Using server {}", url),
                Some(json!({ "server_url": url })),
            )
        }
        ServerCommands::Show => {
            let username = config.session.as_ref().map(|s| s.username.clone());
            match output_format {
                OutputFormat::Json => utils::output_success(
                    &output_format,
                    "Current server",
                    Some(json!({ "server_url": config.server_url, "username": username })),
                ),
                OutputFormat::Text => {
                    println!("Server: {}", config.server_url);
                    match username {
                        Some(name) => println!("Logged in as: {}", name),
                        None => println!("Not logged in"),
                    }
                    Ok(())
                }
            }
        }
        ServerCommands::Health => {
            let client = client_for(&config)?;
            let health = client.health().await.map_err(utils::friendly)?;
            let status = health
                .get("status")
                .and_then(|s| s.as_str())
                .unwrap_or("unknown")
                .to_string();
            utils::output_success(
                &output_format,
                &format!("{} is {}", config.server_url, status),
                Some(health),
            )
        }
    }
}
