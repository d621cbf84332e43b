use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::auth::{hash_password, verify_password, Claims, HashParams, TokenError, TokenService};
use crate::database::{CredentialStore, DatabaseError, User};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("User already exists: {0}")]
    Conflict(String),
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Password hashing error: {0}")]
    Hashing(String),
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// Registration, login and token verification over a credential store
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    tokens: TokenService,
    hash_params: HashParams,
}

impl AuthService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        tokens: TokenService,
        hash_params: HashParams,
    ) -> Self {
        Self {
            credentials,
            tokens,
            hash_params,
        }
    }

    /// Create a user with a salted Argon2 hash of `password`
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        if self.credentials.find_user_by_username(username).await?.is_some() {
            return Err(AuthError::Conflict(username.to_string()));
        }

        let params = self.hash_params;
        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, &params))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(AuthError::Hashing)?;

        // the store's uniqueness check settles concurrent registrations
        let user = self
            .credentials
            .insert_user(User::new(username, password_hash))
            .await
            .map_err(|e| match e {
                DatabaseError::Duplicate(_) => AuthError::Conflict(username.to_string()),
                other => AuthError::Database(other),
            })?;

        info!("Registered user '{}' ({})", user.username, user.id);
        Ok(user)
    }

    /// Check credentials and issue a session token
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user = self
            .credentials
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| {
                debug!("Login for unknown user '{}'", username);
                AuthError::NotFound(username.to_string())
            })?;

        let password = password.to_string();
        let stored_hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(AuthError::Hashing)?;

        if !matches {
            warn!("Failed login for user '{}'", username);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, &user.username)?;
        debug!("Issued token for user '{}'", user.username);
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.tokens.verify(token)
    }
}
