pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod types;

pub use routes::app;
pub use state::AppState;

/// Install the global `tracing` subscriber; `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("notes_api_rust=info,tower_http=info"));

    // a second init (tests, embedded use) is harmless
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
