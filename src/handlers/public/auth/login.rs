// handlers/public/auth/login.rs - POST /login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::handlers::parse_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::{Credentials, TokenResponse};

/// POST /login - Authenticate user and receive a session token
///
/// Input: `{"username": "alice", "password": "pw"}`
///
/// Output: `{"token": "eyJhbGciOiJIUzI1NiI..."}`. The token goes back in the
/// `Authorization` header as-is.
///
/// Unknown users and wrong passwords are both 400.
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<TokenResponse> {
    let credentials = parse_body(payload)?;
    credentials.require_filled()?;

    let token = state
        .auth
        .login(&credentials.username, &credentials.password)
        .await?;

    Ok(ApiResponse::success(TokenResponse { token }))
}
