//! Authentication handlers

use axum::{extract::State, Extension, Json};
use tracing::{info, warn};
use validator::Validate;

use crate::auth::{create_token, Claims};
use crate::dto::auth::{LoginRequest, LoginResponse, UserResponse, BEARER};
use crate::{error::ApiError, AppState};

/// Exchanges email and password for a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let account = match state.service.authenticate(&request.email, &request.password).await {
        Ok(account) => account,
        Err(err) => {
            warn!(email = %request.email, error = %err, "Login failed");
            return Err(err.into());
        }
    };

    let access_token = create_token(
        account.id,
        account.role,
        &state.config.jwt_secret,
        state.config.jwt_expiration_secs,
    )?;

    info!(user_id = %account.id, role = %account.role, "Token issued");

    Ok(Json(LoginResponse {
        access_token,
        token_type: BEARER.to_string(),
        role: account.role,
        user_id: account.id,
    }))
}

/// Profile of the token's owner
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserResponse>, ApiError> {
    let account = state.service.current_account(claims.user_id()?).await?;
    Ok(Json(account.into()))
}
