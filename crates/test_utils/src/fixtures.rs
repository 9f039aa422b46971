//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for the case portal. Values are fixed so tests stay
//! predictable.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{ClientId, UserId};
use domain_case::{
    Actor, ApplicantIdentity, CaseService, ClientSubmission, DocumentType, DocumentUpload,
    GovernmentId, InMemoryAccountDirectory, InMemoryCaseStore, InMemoryDocumentStore,
    PostalAddress,
};

/// Credentials of the admin seeded by [`ServiceFixture`]
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-password";

/// Fixture for applicant data
pub struct ApplicantFixtures;

impl ApplicantFixtures {
    pub fn date_of_birth() -> NaiveDate {
        NaiveDate::from_ymd_opt(1985, 6, 15).unwrap()
    }

    /// A submission that passes every intake rule
    pub fn submission(email: &str) -> ClientSubmission {
        ClientSubmission {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
            phone: "+15551234567".to_string(),
            date_of_birth: Self::date_of_birth(),
            ssn: "123-45-6789".to_string(),
            address: "123 Main Street".to_string(),
            city: "Springfield".to_string(),
            state: "il".to_string(),
            zip_code: "62701".to_string(),
            agreed_to_terms: true,
            documents: Self::uploads(),
        }
    }

    /// Both required documents
    pub fn uploads() -> Vec<DocumentUpload> {
        vec![
            DocumentUpload {
                document_type: DocumentType::DriverLicense,
                filename: "license.jpg".to_string(),
                size_bytes: 204_800,
            },
            DocumentUpload {
                document_type: DocumentType::BillingAddressProof,
                filename: "utility-bill.pdf".to_string(),
                size_bytes: 512_000,
            },
        ]
    }

    pub fn identity(first_name: &str, last_name: &str, email: &str) -> ApplicantIdentity {
        ApplicantIdentity {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone: "5551234567".to_string(),
            date_of_birth: Self::date_of_birth(),
            ssn: GovernmentId::new("123-45-6789"),
            address: PostalAddress {
                street: "123 Main Street".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62701".to_string(),
            },
        }
    }
}

/// Fixture for timestamps
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// A fixed intake time
    pub fn intake() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    /// Intake time shifted by whole days
    pub fn days_after_intake(days: i64) -> DateTime<Utc> {
        Self::intake() + chrono::Duration::days(days)
    }
}

/// Fixture for identifiers and actors
pub struct IdFixtures;

impl IdFixtures {
    pub fn client_id() -> ClientId {
        ClientId::new()
    }

    pub fn admin() -> Actor {
        Actor::admin(UserId::new())
    }

    pub fn client() -> Actor {
        Actor::client(UserId::new())
    }
}

/// A [`CaseService`] over fresh in-memory adapters with a seeded admin
pub struct ServiceFixture {
    pub service: CaseService,
    pub directory: Arc<InMemoryAccountDirectory>,
    pub store: Arc<InMemoryCaseStore>,
    pub documents: Arc<InMemoryDocumentStore>,
    pub admin: Actor,
}

impl ServiceFixture {
    pub async fn new() -> Self {
        let directory = Arc::new(InMemoryAccountDirectory::new());
        let store = Arc::new(InMemoryCaseStore::new());
        let documents = Arc::new(InMemoryDocumentStore::new());
        let admin = directory.seed_admin(ADMIN_EMAIL, ADMIN_PASSWORD).await.actor();

        let service = CaseService::new(store.clone(), documents.clone(), directory.clone());

        Self {
            service,
            directory,
            store,
            documents,
            admin,
        }
    }
}
