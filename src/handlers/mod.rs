// handlers/mod.rs - Handler tiers
//
// Public (no token) → Protected (token required, owner identity injected)

pub mod protected; // /notes/* - owner-scoped note operations
pub mod public;    // /register, /login
pub mod system;    // /, /health

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::ApiError;

/// Unwrap a JSON body, turning axum's rejection into a 400 with our error body
pub(crate) fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!("Rejected request body: {}", rejection.body_text());
            Err(ApiError::invalid_json(rejection.body_text()))
        }
    }
}
