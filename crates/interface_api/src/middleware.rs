//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::{info, warn};

use domain_case::Role;

use crate::auth::{validate_token, Claims};
use crate::error::ApiError;
use crate::AppState;

/// Authentication middleware
///
/// Validates the bearer token, then resolves the account behind it. Missing
/// or inactive accounts are rejected, and the stored claims carry the
/// account's current role rather than the one signed into the token.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| {
            warn!(uri = %request.uri(), "Missing or invalid Authorization header");
            ApiError::Unauthorized("Not authenticated".to_string())
        })?;

    let mut claims = match validate_token(token, &state.config.jwt_secret) {
        Ok(claims) => claims,
        Err(e) => {
            warn!(error = %e, "Token validation failed");
            return Err(e.into());
        }
    };

    let account = state
        .service
        .current_account(claims.user_id()?)
        .await
        .map_err(|e| {
            warn!(user = %claims.sub, error = %e, "Token refused for account");
            ApiError::from(e)
        })?;
    claims.role = account.role;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Rejects callers whose token does not carry the admin role
///
/// Must run after [`auth_middleware`].
pub async fn require_admin(request: Request<Body>, next: Next) -> Response {
    let role = request.extensions().get::<Claims>().map(|c| c.role);
    match role {
        Some(Role::Admin) => next.run(request).await,
        Some(role) => {
            warn!(role = %role, uri = %request.uri(), "Admin route refused");
            ApiError::Forbidden("Admin access required".to_string()).into_response()
        }
        None => ApiError::Unauthorized("Not authenticated".to_string()).into_response(),
    }
}

/// Audit logging middleware
///
/// Logs every authenticated API request
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user_id = request
        .extensions()
        .get::<Claims>()
        .map(|c| c.sub.clone())
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        user = %user_id,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
