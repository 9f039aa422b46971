//! Dashboard view models
//!
//! Each view is built from received cases plus a [`StageCatalog`] and holds
//! exactly what a page renders. All stage metadata comes from the status
//! engine in `domain_case`. A status this build does not recognise renders
//! as pending with the `degraded` flag set.

use chrono::{DateTime, Utc};

use core_kernel::ClientId;
use domain_case::{
    can_transition, ensure_can_transition, next_stage, timeline, Case, CaseError, CaseStats,
    CaseStatus, DocumentType, Role, StageCatalog, StageClass, StageDescriptor, StatusDisplay,
    display_status,
};
use interface_api::dto::DocumentInfoResponse;

use crate::wire::ReceivedCase;

/// One stage of the progress timeline
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
    pub status: CaseStatus,
    pub title: String,
    pub class: StageClass,
    /// When the case last entered this stage
    pub reached_at: Option<DateTime<Utc>>,
}

/// One history entry, ready to print
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    /// `pending` when the entry's status was not recognised
    pub status: CaseStatus,
    pub label: String,
    pub note: String,
    pub timestamp: DateTime<Utc>,
    pub degraded: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRow {
    pub document_type: DocumentType,
    pub filename: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

impl DocumentRow {
    fn from_response(document_type: DocumentType, info: &DocumentInfoResponse) -> Self {
        Self {
            document_type,
            filename: info.filename.clone(),
            size: info.size,
            uploaded_at: info.uploaded_at,
        }
    }
}

fn history_rows(received: &ReceivedCase, catalog: &StageCatalog) -> Vec<HistoryRow> {
    received
        .case()
        .status_history()
        .iter()
        .enumerate()
        .rev()
        .map(|(index, entry)| {
            let display = display_status(received.raw_history_status(index));
            let note = match entry.note() {
                Some(note) => note.to_string(),
                None if display.degraded => format!("Status updated to {}", display.raw),
                None => entry.display_note(),
            };
            HistoryRow {
                status: display.descriptor.status,
                label: catalog.status_label(display.descriptor.status),
                note,
                timestamp: entry.timestamp(),
                degraded: display.degraded,
            }
        })
        .collect()
}

fn document_rows(received: &ReceivedCase) -> Vec<DocumentRow> {
    received
        .response
        .documents_info
        .iter()
        .map(|(kind, info)| DocumentRow::from_response(*kind, info))
        .collect()
}

/// The client's own dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDashboardView {
    pub client_name: String,
    pub status: StatusDisplay,
    /// Localized badge label
    pub label: String,
    pub progress_percentage: f64,
    pub next_stage: Option<StageDescriptor>,
    pub timeline: Vec<TimelineRow>,
    pub history: Vec<HistoryRow>,
    pub documents: Vec<DocumentRow>,
    /// Latest staff note, if any
    pub notes: Option<String>,
}

impl ClientDashboardView {
    pub fn new(received: &ReceivedCase, catalog: &StageCatalog) -> Self {
        let case = received.case();
        let status = received.status();
        let current = status.descriptor.status;

        let timeline = timeline(current)
            .into_iter()
            .map(|step| {
                let reached_at = case
                    .history_newest_first()
                    .find(|entry| entry.status() == step.descriptor.status)
                    .map(|entry| entry.timestamp());
                TimelineRow {
                    status: step.descriptor.status,
                    title: catalog.timeline_title(step.descriptor.status),
                    class: step.class,
                    reached_at,
                }
            })
            .collect();

        let notes = Some(case.notes.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Self {
            client_name: case.identity.full_name(),
            label: catalog.status_label(current),
            progress_percentage: if status.degraded {
                0.0
            } else {
                status.descriptor.progress_percentage
            },
            next_stage: next_stage(current),
            timeline,
            history: history_rows(received, catalog),
            documents: document_rows(received),
            notes,
            status,
        }
    }

    pub fn current(&self) -> &StageDescriptor {
        &self.status.descriptor
    }
}

/// A choice in the status dropdown
#[derive(Debug, Clone, PartialEq)]
pub struct StatusOption {
    pub status: CaseStatus,
    pub label: String,
    pub selected: bool,
}

/// The status update form on the case detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusForm {
    pub current: CaseStatus,
    pub status: CaseStatus,
    pub notes: String,
}

impl StatusForm {
    pub fn new(current: CaseStatus) -> Self {
        Self {
            current,
            status: current,
            notes: String::new(),
        }
    }

    /// Validates the form before it is sent
    ///
    /// # Errors
    ///
    /// `ForbiddenTransition` for a role that may not change status, and
    /// `NoOpUpdate` when neither the status nor the notes change anything.
    pub fn submission(&self, role: Role) -> Result<(CaseStatus, Option<String>), CaseError> {
        ensure_can_transition(role, self.current, self.status)?;

        let notes = self.notes.trim();
        if self.status == self.current && notes.is_empty() {
            return Err(CaseError::NoOpUpdate);
        }
        let notes = (!notes.is_empty()).then(|| notes.to_string());
        Ok((self.status, notes))
    }
}

/// Admin case detail page
#[derive(Debug, Clone, PartialEq)]
pub struct AdminCaseView {
    pub case: Case,
    pub status: StatusDisplay,
    pub label: String,
    pub status_options: Vec<StatusOption>,
    /// Whether the update form is enabled for the viewer
    pub can_update: bool,
    pub history: Vec<HistoryRow>,
    pub documents: Vec<DocumentRow>,
    pub masked_ssn: String,
}

impl AdminCaseView {
    pub fn new(received: &ReceivedCase, viewer: Role, catalog: &StageCatalog) -> Self {
        let case = received.case();
        let display = received.status();
        let current = display.descriptor.status;

        // nothing is preselected for an unrecognised status
        let status_options = CaseStatus::ALL
            .iter()
            .map(|&status| StatusOption {
                status,
                label: catalog.status_label(status),
                selected: !display.degraded && status == current,
            })
            .collect();
        let can_update = CaseStatus::ALL
            .iter()
            .any(|&to| can_transition(viewer, current, to));

        Self {
            label: catalog.status_label(current),
            status_options,
            can_update,
            history: history_rows(received, catalog),
            documents: document_rows(received),
            masked_ssn: case.identity.ssn.masked(),
            case: case.clone(),
            status: display,
        }
    }

    pub fn form(&self) -> StatusForm {
        StatusForm::new(self.case.status())
    }
}

/// One line of the admin case table
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRow {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: CaseStatus,
    pub label: String,
    pub degraded: bool,
    pub created_at: DateTime<Utc>,
}

/// Admin overview page
#[derive(Debug, Clone, PartialEq)]
pub struct AdminDashboardView {
    pub total: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub completed: u64,
    cases: Vec<Case>,
    statuses: Vec<(StatusDisplay, String)>,
}

impl AdminDashboardView {
    pub fn new(stats: &CaseStats, cases: Vec<ReceivedCase>, catalog: &StageCatalog) -> Self {
        let statuses = cases
            .iter()
            .map(|received| {
                let display = received.status();
                let label = catalog.status_label(display.descriptor.status);
                (display, label)
            })
            .collect();
        let cases = cases.into_iter().map(|received| received.response.case).collect();
        Self {
            total: stats.total_count,
            pending: stats.pending(),
            in_progress: stats.in_progress(),
            completed: stats.completed(),
            cases,
            statuses,
        }
    }

    /// Rows whose first name, last name or email contain `search`, ignoring case
    pub fn rows(&self, search: &str) -> Vec<CaseRow> {
        self.cases
            .iter()
            .zip(&self.statuses)
            .filter(|(case, _)| case.matches_search(search))
            .map(|(case, (display, label))| CaseRow {
                id: case.id,
                first_name: case.identity.first_name.clone(),
                last_name: case.identity.last_name.clone(),
                email: case.identity.email.clone(),
                status: display.descriptor.status,
                label: label.clone(),
                degraded: display.degraded,
                created_at: case.created_at,
            })
            .collect()
    }
}
