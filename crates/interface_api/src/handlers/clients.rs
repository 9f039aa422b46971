//! Client handlers

use axum::{extract::State, http::StatusCode, Extension, Json};

use domain_case::ClientSubmission;

use crate::auth::Claims;
use crate::dto::clients::{CaseResponse, SubmissionResponse};
use crate::{error::ApiError, AppState};

/// Intake of a new application
pub async fn submit_application(
    State(state): State<AppState>,
    Json(submission): Json<ClientSubmission>,
) -> Result<(StatusCode, Json<SubmissionResponse>), ApiError> {
    let receipt = state.service.submit_application(submission).await?;
    Ok((StatusCode::CREATED, Json(receipt.into())))
}

/// The caller's own case; clients only
pub async fn my_dashboard(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<CaseResponse>, ApiError> {
    let account = state.service.current_account(claims.user_id()?).await?;
    let case = state.service.client_case(&account).await?;
    Ok(Json(CaseResponse::from_case(case)))
}
