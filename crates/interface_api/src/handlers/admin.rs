//! Admin handlers
//!
//! Mounted behind [`crate::middleware::require_admin`].

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use validator::Validate;

use core_kernel::ClientId;
use domain_case::{CaseQuery, CaseStatus};

use crate::auth::Claims;
use crate::dto::admin::*;
use crate::dto::clients::CaseResponse;
use crate::{error::ApiError, AppState};

fn parse_client_id(raw: &str) -> Result<ClientId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound("Client not found".to_string()))
}

/// Lists cases, optionally by status and search term
pub async fn list_clients(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ListClientsQuery>,
) -> Result<Json<Vec<CaseResponse>>, ApiError> {
    let query = CaseQuery::try_from(query)?;
    let cases = state.service.list_cases(&claims.actor()?, query).await?;
    Ok(Json(cases.into_iter().map(CaseResponse::from_case).collect()))
}

/// One case with its documents
pub async fn get_client(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<CaseResponse>, ApiError> {
    let detail = state
        .service
        .fetch_case(&claims.actor()?, parse_client_id(&id)?)
        .await?;
    Ok(Json(detail.into()))
}

/// Moves a case to a new status
pub async fn update_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let to: CaseStatus = request.status.parse()?;
    let note = request.notes.as_deref().unwrap_or("");

    let case = state
        .service
        .update_case_status(&claims.actor()?, parse_client_id(&id)?, to, note)
        .await?;

    Ok(Json(UpdateStatusResponse {
        success: true,
        message: "Status updated successfully".to_string(),
        client: case,
    }))
}

/// Dashboard counters and recent cases
pub async fn stats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.service.stats(&claims.actor()?).await?;
    Ok(Json(stats.into()))
}
