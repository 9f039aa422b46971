//! Aggregate case statistics for the admin dashboard

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::ClientId;
use crate::case::Case;
use crate::status::CaseStatus;

/// Number of recent cases carried in [`CaseStats::recent`]
pub const RECENT_CASE_LIMIT: usize = 10;

/// Short listing of a case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub case_status: CaseStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&Case> for CaseSummary {
    fn from(case: &Case) -> Self {
        Self {
            id: case.id,
            first_name: case.identity.first_name.clone(),
            last_name: case.identity.last_name.clone(),
            email: case.identity.email.clone(),
            case_status: case.status(),
            created_at: case.created_at,
        }
    }
}

/// Counts by status plus the most recently created cases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStats {
    pub total_count: u64,
    /// Every status is present, zero-filled
    pub count_by_status: BTreeMap<CaseStatus, u64>,
    /// Newest first, at most [`RECENT_CASE_LIMIT`]
    pub recent: Vec<CaseSummary>,
}

impl Default for CaseStats {
    fn default() -> Self {
        Self {
            total_count: 0,
            count_by_status: CaseStatus::ALL.iter().map(|&s| (s, 0)).collect(),
            recent: Vec::new(),
        }
    }
}

impl CaseStats {
    /// Computes statistics over a set of cases
    pub fn from_cases<'a>(cases: impl IntoIterator<Item = &'a Case>) -> Self {
        let mut stats = Self::default();
        let mut summaries = Vec::new();

        for case in cases {
            stats.total_count += 1;
            *stats.count_by_status.entry(case.status()).or_insert(0) += 1;
            summaries.push(CaseSummary::from(case));
        }

        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries.truncate(RECENT_CASE_LIMIT);
        stats.recent = summaries;
        stats
    }

    pub fn count(&self, status: CaseStatus) -> u64 {
        self.count_by_status.get(&status).copied().unwrap_or(0)
    }

    pub fn pending(&self) -> u64 {
        self.count(CaseStatus::Pending)
    }

    /// Cases strictly between `pending` and `completed`
    pub fn in_progress(&self) -> u64 {
        CaseStatus::ALL
            .iter()
            .filter(|s| s.is_in_progress())
            .map(|&s| self.count(s))
            .sum()
    }

    pub fn completed(&self) -> u64 {
        self.count(CaseStatus::Completed)
    }
}
