use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub username: String,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret is not configured")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    Generation(String),

    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Signs and verifies HS256 session tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: Option<u64>,
}

impl TokenService {
    pub fn new(secret: &str, expiry_hours: Option<u64>) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, TokenError> {
        Self::new(&security.jwt_secret, security.token_expiry_hours)
    }

    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = match self.expiry_hours {
            Some(hours) => Some(expires_at(now, hours)?),
            None => None,
        };
        let claims = Claims {
            user_id,
            username: username.to_string(),
            iat: now.timestamp(),
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // exp is only required when this deployment issues it
        validation.required_spec_claims.clear();
        validation.validate_exp = self.expiry_hours.is_some();
        if validation.validate_exp {
            validation.set_required_spec_claims(&["exp"]);
        }

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}

fn expires_at(now: DateTime<Utc>, hours: u64) -> Result<i64, TokenError> {
    i64::try_from(hours)
        .ok()
        .and_then(Duration::try_hours)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .map(|exp| exp.timestamp())
        .ok_or_else(|| TokenError::Generation(format!("token expiry of {} hours is out of range", hours)))
}
