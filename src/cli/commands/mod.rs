pub mod auth;
pub mod notes;
pub mod server;

use crate::cli::config::CliConfig;
use crate::cli::utils;
use crate::client::ApiClient;

/// Client for the configured server
pub(crate) fn client_for(config: &CliConfig) -> anyhow::Result<ApiClient> {
    ApiClient::new(&config.server_url).map_err(utils::friendly)
}
