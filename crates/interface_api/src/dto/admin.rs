//! Admin DTOs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_case::{Case, CaseQuery, CaseStats, CaseStatus, CaseSummary};

use crate::error::ApiError;

/// Query string of `GET /api/admin/clients`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListClientsQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl TryFrom<ListClientsQuery> for CaseQuery {
    type Error = ApiError;

    fn try_from(query: ListClientsQuery) -> Result<Self, Self::Error> {
        let status = query
            .status
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<CaseStatus>())
            .transpose()?;

        Ok(CaseQuery {
            status,
            search: query.search.filter(|s| !s.trim().is_empty()),
            limit: None,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    /// Raw status value; parsed so unknown values are reported as such
    pub status: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusResponse {
    pub success: bool,
    pub message: String,
    pub client: Case,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_clients: u64,
    pub status_counts: BTreeMap<CaseStatus, u64>,
    pub recent_clients: Vec<CaseSummary>,
}

impl From<CaseStats> for StatsResponse {
    fn from(stats: CaseStats) -> Self {
        Self {
            total_clients: stats.total_count,
            status_counts: stats.count_by_status,
            recent_clients: stats.recent,
        }
    }
}

impl From<StatsResponse> for CaseStats {
    fn from(response: StatsResponse) -> Self {
        CaseStats {
            total_count: response.total_clients,
            count_by_status: response.status_counts,
            recent: response.recent_clients,
        }
    }
}
