use std::sync::Arc;

use crate::auth::{HashParams, TokenError, TokenService};
use crate::config::{AppConfig, StorageBackend};
use crate::database::{DatabaseError, DatabaseManager, MemoryStore, NoteStore, PgStore};
use crate::services::AuthService;

/// Shared handler state. Cloning is cheap; the only shared resource is the store.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: AuthService,
    pub notes: Arc<dyn NoteStore>,
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl AppState {
    /// Wire services around one concrete store implementing both traits
    pub fn with_store<S>(config: AppConfig, store: S) -> Result<Self, StateError>
    where
        S: crate::database::CredentialStore + NoteStore + 'static,
    {
        let store = Arc::new(store);
        let tokens = TokenService::from_config(&config.security)?;
        let auth = AuthService::new(
            store.clone(),
            tokens,
            HashParams::from_config(&config.security),
        );

        Ok(Self {
            config: Arc::new(config),
            auth,
            notes: store,
        })
    }

    /// Build state for the configured backend, connecting to Postgres if needed
    pub async fn from_config(config: AppConfig) -> Result<Self, StateError> {
        match config.database.backend {
            StorageBackend::Postgres => {
                let pool = DatabaseManager::connect(&config.database).await?;
                DatabaseManager::ensure_schema(&pool).await?;
                Self::with_store(config, PgStore::new(pool))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory store; data is lost on restart");
                Self::with_store(config, MemoryStore::new())
            }
        }
    }
}
