//! Case aggregate

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClientId, FileId, UserId};
use crate::error::CaseError;
use crate::history::StatusHistoryEntry;
use crate::role::Actor;
use crate::status::CaseStatus;
use crate::transition::record_transition;

/// Mailing address of the applicant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    #[serde(rename = "address")]
    pub street: String,
    pub city: String,
    /// Two-letter state code
    pub state: String,
    pub zip_code: String,
}

impl fmt::Display for PostalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {} {}", self.street, self.city, self.state, self.zip_code)
    }
}

/// Social security number in `NNN-NN-NNNN` form
///
/// `Debug` and [`GovernmentId::masked`] only reveal the last four digits.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GovernmentId(String);

impl GovernmentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn last_four(&self) -> &str {
        let len = self.0.len();
        self.0.get(len.saturating_sub(4)..).unwrap_or("")
    }

    /// `***-**-1234`
    pub fn masked(&self) -> String {
        format!("***-**-{}", self.last_four())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for GovernmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GovernmentId({})", self.masked())
    }
}

/// Personal data collected at intake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantIdentity {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub ssn: GovernmentId,
    #[serde(flatten)]
    pub address: PostalAddress,
}

impl ApplicantIdentity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Kind of identity document collected at intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    DriverLicense,
    /// Utility bill or statement dated within the last three months
    BillingAddressProof,
}

impl DocumentType {
    /// Documents every submission must include
    pub const REQUIRED: [DocumentType; 2] = [
        DocumentType::DriverLicense,
        DocumentType::BillingAddressProof,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::DriverLicense => "driver_license",
            DocumentType::BillingAddressProof => "billing_address_proof",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata of an uploaded document; the bytes live in the document store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub file_id: FileId,
    pub filename: String,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// Uploaded documents keyed by type
pub type DocumentIndex = BTreeMap<DocumentType, DocumentInfo>;

/// One applicant's remediation process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Unique identifier
    pub id: ClientId,
    /// Client account that owns the case
    #[serde(default)]
    pub owner_id: Option<UserId>,
    #[serde(flatten)]
    pub identity: ApplicantIdentity,
    #[serde(rename = "case_status")]
    status: CaseStatus,
    status_history: Vec<StatusHistoryEntry>,
    /// Uploaded documents
    #[serde(default)]
    pub documents: DocumentIndex,
    /// Latest staff note
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Case {
    /// Opens a new case in `pending` with the submission history entry
    pub fn open(identity: ApplicantIdentity, documents: DocumentIndex, now: DateTime<Utc>) -> Self {
        Self {
            id: ClientId::new_v7(),
            owner_id: None,
            identity,
            status: CaseStatus::Pending,
            status_history: vec![StatusHistoryEntry::application_submitted(now)],
            documents,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Current status
    pub fn status(&self) -> CaseStatus {
        self.status
    }

    /// Audit trail, oldest first
    pub fn status_history(&self) -> &[StatusHistoryEntry] {
        &self.status_history
    }

    /// Audit trail, newest first
    pub fn history_newest_first(&self) -> impl Iterator<Item = &StatusHistoryEntry> {
        self.status_history.iter().rev()
    }

    /// Applies an entry produced by [`record_transition`]
    ///
    /// The entry's note replaces the staff notes; an entry without a note
    /// keeps the existing notes.
    pub fn apply_transition(&mut self, entry: StatusHistoryEntry) {
        self.status = entry.status();
        if let Some(note) = entry.note() {
            self.notes = note.to_string();
        }
        self.updated_at = entry.timestamp();
        self.status_history.push(entry);
    }

    /// Records and applies a transition in one step
    pub fn transition(
        &mut self,
        to: CaseStatus,
        note: &str,
        actor: &Actor,
    ) -> Result<&StatusHistoryEntry, CaseError> {
        let entry = record_transition(self, to, note, actor)?;
        self.apply_transition(entry);
        Ok(&self.status_history[self.status_history.len() - 1])
    }

    /// Whether the search term matches first name, last name or email
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [
            &self.identity.first_name,
            &self.identity.last_name,
            &self.identity.email,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
    }

    /// True when every required document has been recorded
    pub fn has_required_documents(&self) -> bool {
        DocumentType::REQUIRED
            .iter()
            .all(|kind| self.documents.contains_key(kind))
    }
}
