use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

const DEV_JWT_SECRET: &str = "notes-dev-secret-change-me";
/// Ten years
const MAX_TOKEN_EXPIRY_HOURS: u64 = 10 * 365 * 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    #[serde(skip_serializing)]
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing, default)]
    pub jwt_secret: String,
    /// Unset means tokens carry no `exp` claim and never expire.
    pub token_expiry_hours: Option<u64>,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub password_hash_memory_kib: u32,
    pub password_hash_iterations: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SECURITY_JWT_SECRET must be set outside development")]
    MissingJwtSecret,

    #[error("DATABASE_URL must be set when STORAGE_BACKEND=postgres")]
    MissingDatabaseUrl,

    #[error("SECURITY_TOKEN_EXPIRY_HOURS must be at most {max}, got {hours}")]
    TokenExpiryTooLong { hours: u64, max: u64 },

    #[error("Invalid password hash cost: {0}")]
    InvalidHashCost(String),
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        Self::for_environment(environment).with_env_overrides()
    }

    /// Preset defaults for an environment, without consulting env vars.
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("NOTES_API_HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("NOTES_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = Some(v);
                self.database.backend = StorageBackend::Postgres;
            }
        }
        match env::var("STORAGE_BACKEND").as_deref() {
            Ok("memory") => self.database.backend = StorageBackend::Memory,
            Ok("postgres") | Ok("postgresql") => self.database.backend = StorageBackend::Postgres,
            _ => {}
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_TOKEN_EXPIRY_HOURS") {
            self.security.token_expiry_hours = v.parse().ok().filter(|hours: &u64| *hours > 0);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("SECURITY_PASSWORD_HASH_MEMORY_KIB") {
            self.security.password_hash_memory_kib =
                v.parse().unwrap_or(self.security.password_hash_memory_kib);
        }
        if let Ok(v) = env::var("SECURITY_PASSWORD_HASH_ITERATIONS") {
            self.security.password_hash_iterations =
                v.parse().unwrap_or(self.security.password_hash_iterations);
        }

        self
    }

    /// Checks settings that cannot be defaulted safely.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.is_empty()
            || (self.environment != Environment::Development
                && self.security.jwt_secret == DEV_JWT_SECRET)
        {
            return Err(ConfigError::MissingJwtSecret);
        }
        if self.database.backend == StorageBackend::Postgres && self.database.url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        if let Some(hours) = self.security.token_expiry_hours {
            if hours > MAX_TOKEN_EXPIRY_HOURS {
                return Err(ConfigError::TokenExpiryTooLong {
                    hours,
                    max: MAX_TOKEN_EXPIRY_HOURS,
                });
            }
        }
        argon2::Params::new(
            self.security.password_hash_memory_kib,
            self.security.password_hash_iterations,
            1,
            None,
        )
        .map_err(|e| ConfigError::InvalidHashCost(e.to_string()))?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                backend: StorageBackend::Memory,
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                jwt_secret: DEV_JWT_SECRET.to_string(),
                token_expiry_hours: None,
                enable_cors: true,
                cors_origins: vec!["*".to_string()],
                password_hash_memory_kib: 19 * 1024,
                password_hash_iterations: 2,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                backend: StorageBackend::Postgres,
                url: None,
                max_connections: 20,
                connection_timeout: 10,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 10 * 1024 * 1024,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                token_expiry_hours: None,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
                password_hash_memory_kib: 19 * 1024,
                password_hash_iterations: 2,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                backend: StorageBackend::Postgres,
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            api: ApiConfig {
                enable_request_logging: false,
                max_request_size_bytes: 10 * 1024 * 1024,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                token_expiry_hours: None,
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
                password_hash_memory_kib: 64 * 1024,
                password_hash_iterations: 3,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
