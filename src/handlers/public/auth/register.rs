// handlers/public/auth/register.rs - POST /register handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::handlers::parse_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::{Credentials, MessageResponse};

/// POST /register - Register new user account
///
/// Input: `{"username": "alice", "password": "pw"}`
///
/// - 201 `{"message": "User registered successfully"}`
/// - 400 when a field is missing/invalid or the username is taken
pub async fn register_post(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let credentials = parse_body(payload)?;
    credentials.validate_for_registration()?;

    state
        .auth
        .register(&credentials.username, &credentials.password)
        .await?;

    Ok(ApiResponse::created(MessageResponse {
        message: "User registered successfully".to_string(),
    }))
}
