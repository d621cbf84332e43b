use clap::Subcommand;
use serde_json::json;

use crate::cli::commands::client_for;
use crate::cli::config::{CliConfig, StoredSession};
use crate::cli::utils;
use crate::cli::OutputFormat;
use crate::types::Credentials;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Register new user")]
    Register {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Login to server")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and forget the stored token")]
    Logout,

    #[command(about = "Show who is logged in")]
    Profile,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut config = CliConfig::load()?;

    match cmd {
        AuthCommands::Register { username, password } => {
            let credentials = Credentials::new(username, utils::resolve_password(password)?);
            credentials.require_filled()?;

            let client = client_for(&config)?;
            let message = client
                .register(&credentials)
                .await
                .map_err(utils::friendly)?;

            utils::output_success(
                &output_format,
                &message,
                Some(json!({ "username": credentials.username })),
            )
        }
        AuthCommands::Login { username, password } => {
            let credentials = Credentials::new(username, utils::resolve_password(password)?);
            credentials.require_filled()?;

            let client = client_for(&config)?;
            let session = client.login(&credentials).await.map_err(utils::friendly)?;
            tracing::debug!("Logged in as {}", session.username);

            let username = session.username.clone();
            config.session = Some(StoredSession::from(session));
            config.save()?;

            utils::output_success(
                &output_format,
                &format!("Logged in as {}", username),
                Some(json!({ "username": username, "server_url": config.server_url })),
            )
        }
        AuthCommands::Logout => {
            let previous = config.session.take();
            config.save()?;

            let message = match previous {
                Some(session) => format!("Logged out {}", session.username),
                None => "Not logged in".to_string(),
            };
            utils::output_success(&output_format, &message, None)
        }
        AuthCommands::Profile => {
            let session = config
                .session
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("Not logged in; run `notes auth login <username>` first"))?;

            match output_format {
                OutputFormat::Json => utils::output_success(
                    &output_format,
                    "Profile",
                    Some(json!({
                        "username": session.username,
                        "server_url": config.server_url,
                        "logged_in_at": session.logged_in_at,
                    })),
                ),
                OutputFormat::Text => {
                    println!("Username:     {}", session.username);
                    println!("Server:       {}", config.server_url);
                    println!("Logged in at: {}", session.logged_in_at.to_rfc3339());
                    Ok(())
                }
            }
        }
    }
}
