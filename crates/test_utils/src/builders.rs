//! Test Data Builders
//!
//! Builders that construct cases with sensible defaults so tests only spell
//! out the fields they care about.

use chrono::{DateTime, Utc};
use core_kernel::UserId;
use domain_case::{Actor, ApplicantIdentity, Case, CaseStatus, DocumentIndex, DocumentInfo, DocumentType};

use crate::fixtures::{ApplicantFixtures, IdFixtures, TemporalFixtures};

/// Builder for cases at any stage
///
/// The case is opened in `pending` and then walked forward one stage at a
/// time, so its history looks like one produced by staff.
pub struct TestCaseBuilder {
    identity: ApplicantIdentity,
    status: CaseStatus,
    created_at: DateTime<Utc>,
    owner_id: Option<UserId>,
    with_documents: bool,
    admin: Actor,
}

impl Default for TestCaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCaseBuilder {
    pub fn new() -> Self {
        Self {
            identity: ApplicantFixtures::identity("Jane", "Doe", "jane.doe@example.com"),
            status: CaseStatus::Pending,
            created_at: TemporalFixtures::intake(),
            owner_id: None,
            with_documents: true,
            admin: IdFixtures::admin(),
        }
    }

    /// Sets the applicant name
    pub fn with_name(mut self, first_name: &str, last_name: &str) -> Self {
        self.identity.first_name = first_name.to_string();
        self.identity.last_name = last_name.to_string();
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.identity.email = email.to_string();
        self
    }

    /// Target status; every earlier stage is recorded on the way
    pub fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = status;
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    pub fn owned_by(mut self, user_id: UserId) -> Self {
        self.owner_id = Some(user_id);
        self
    }

    /// Leaves the document index empty
    pub fn without_documents(mut self) -> Self {
        self.with_documents = false;
        self
    }

    /// Admin recorded on every transition
    pub fn recorded_by(mut self, admin: Actor) -> Self {
        self.admin = admin;
        self
    }

    pub fn build(self) -> Case {
        let documents: DocumentIndex = if self.with_documents {
            DocumentType::REQUIRED
                .iter()
                .map(|kind| {
                    (
                        *kind,
                        DocumentInfo {
                            file_id: core_kernel::FileId::new(),
                            filename: format!("{}.pdf", kind),
                            size_bytes: 100_000,
                            uploaded_at: self.created_at,
                        },
                    )
                })
                .collect()
        } else {
            DocumentIndex::new()
        };

        let mut case = Case::open(self.identity, documents, self.created_at);
        case.owner_id = self.owner_id;

        let mut current = CaseStatus::Pending;
        while current < self.status {
            let Some(next) = current.next() else { break };
            case.transition(next, "", &self.admin)
                .expect("admin transitions always succeed");
            current = next;
        }
        case
    }
}
