use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from the session token
#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// Token authentication middleware that validates tokens and injects the owner identity
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_headers(request.headers())?;

    let claims = state.auth.verify(&token).map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        ApiError::forbidden("Invalid token")
    })?;

    let auth_user = AuthUser::from(claims);
    tracing::debug!("Authenticated request for '{}'", auth_user.username);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extract the raw token from the Authorization header.
/// A `Bearer ` prefix is accepted but not required.
fn extract_token_from_headers(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::forbidden("Invalid Authorization header format"))?;

    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();
    if token.is_empty() {
        return Err(ApiError::unauthorized("Empty token"));
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn raw_token_accepted() {
        let token = extract_token_from_headers(&headers_with("abc.def.ghi")).unwrap();
        assert_eq!(token, "abc.def.ghi");
    }

    #[test]
    fn bearer_prefix_tolerated() {
        let token = extract_token_from_headers(&headers_with("Bearer abc.def.ghi")).unwrap();
        assert_eq!(token, "abc.def.ghi");
    }

    #[test]
    fn missing_or_empty_is_unauthorized() {
        let err = extract_token_from_headers(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = extract_token_from_headers(&headers_with("")).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn non_ascii_header_is_forbidden() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"tok\xffen").unwrap(),
        );
        let err = extract_token_from_headers(&headers).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }
}
