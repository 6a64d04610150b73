use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{verify_jwt, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Header the original web client sends its token in
pub const AUTH_TOKEN_HEADER: &str = "auth-token";

const AUTH_REQUIRED: &str = "Please authenticate using a valid token";

/// Authenticated caller, injected into request extensions by [`fetch_user`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { id: claims.user.id }
    }
}

/// Resolve the caller from its token or reject the request with 401
pub async fn fetch_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&headers).map_err(|msg| {
        tracing::debug!("Rejected request without usable token: {}", msg);
        ApiError::unauthorized(AUTH_REQUIRED)
    })?;

    let claims = verify_jwt(token, &state.jwt_secret).map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        ApiError::unauthorized(AUTH_REQUIRED)
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Token from `auth-token`, falling back to `Authorization: Bearer`
fn extract_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    if let Some(value) = headers.get(AUTH_TOKEN_HEADER) {
        let token = value.to_str().map_err(|_| "Invalid auth-token header")?.trim();
        if token.is_empty() {
            return Err("Empty auth-token header");
        }
        return Ok(token);
    }

    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or("Missing credential")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err("Empty JWT token"),
        None => Err("Authorization header must use Bearer token format"),
    }
}
