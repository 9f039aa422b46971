//! Case Domain Ports
//!
//! Port interfaces for the external systems the case domain depends on: the
//! identity provider that owns logins, the store of record for cases, and the
//! document store holding uploaded files.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_case::ports::CaseStore;
//!
//! pub struct CaseService {
//!     store: Arc<dyn CaseStore>,
//! }
//!
//! impl CaseService {
//!     pub async fn fetch(&self, id: ClientId) -> Result<Case, PortError> {
//!         self.store.fetch_case(id, None).await
//!     }
//! }
//! ```
//!
//! Adapters are chosen at startup. [`crate::adapters`] provides in-memory
//! implementations of all three ports.

use async_trait::async_trait;

use core_kernel::{ClientId, DomainPort, HealthCheckable, OperationMetadata, PortError, UserId};

use crate::account::{IssuedCredentials, UserAccount};
use crate::case::{Case, DocumentInfo, DocumentType};
use crate::history::StatusHistoryEntry;
use crate::stats::CaseStats;
use crate::status::CaseStatus;

/// Query parameters for listing cases
#[derive(Debug, Clone, Default)]
pub struct CaseQuery {
    /// Only cases currently in this status
    pub status: Option<CaseStatus>,
    /// Case-insensitive match on first name, last name or email
    pub search: Option<String>,
    /// Limit results
    pub limit: Option<u32>,
}

impl CaseQuery {
    /// Creates a query filtering by status
    pub fn by_status(status: CaseStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Adds a search term to the query
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Caps the number of results
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a case satisfies every filter of the query
    pub fn matches(&self, case: &Case) -> bool {
        let status_ok = self.status.map_or(true, |s| case.status() == s);
        let search_ok = self
            .search
            .as_deref()
            .map_or(true, |term| case.matches_search(term));
        status_ok && search_ok
    }
}

/// Identity provider holding portal logins
///
/// Password hashing and token issuance belong to the provider; this port only
/// sees plain credentials on the way in and accounts on the way out.
#[async_trait]
pub trait AccountDirectory: DomainPort + HealthCheckable {
    /// Verifies an email and password
    ///
    /// # Returns
    ///
    /// The account, or `PortError::Unauthorized` for a wrong email, a wrong
    /// password, or an inactive account
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<UserAccount, PortError>;

    /// Retrieves an account by ID
    async fn get_account(
        &self,
        id: UserId,
        metadata: Option<OperationMetadata>,
    ) -> Result<UserAccount, PortError>;

    /// Creates a client account for a new case and generates its password
    ///
    /// # Returns
    ///
    /// The one-time credentials, or `PortError::Conflict` if the email is
    /// already registered
    async fn register_client(
        &self,
        email: &str,
        client_id: ClientId,
        metadata: Option<OperationMetadata>,
    ) -> Result<IssuedCredentials, PortError>;

    /// Whether an account already uses this email
    async fn email_registered(
        &self,
        email: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<bool, PortError>;
}

/// Store of record for cases
#[async_trait]
pub trait CaseStore: DomainPort + HealthCheckable {
    /// Retrieves a case by ID
    ///
    /// # Returns
    ///
    /// The case if found, or `PortError::NotFound`
    async fn fetch_case(
        &self,
        id: ClientId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Case, PortError>;

    /// Lists cases matching the query, newest first
    async fn list_cases(
        &self,
        query: CaseQuery,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<Case>, PortError>;

    /// Persists a newly opened case
    ///
    /// # Returns
    ///
    /// `PortError::Conflict` if a case with the same ID exists
    async fn insert_case(
        &self,
        case: Case,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;

    /// Appends a history entry and moves the case to the entry's status
    ///
    /// Concurrent updates are not serialized: the last entry appended
    /// determines the current status.
    ///
    /// # Returns
    ///
    /// The case as stored after the append
    async fn append_status(
        &self,
        id: ClientId,
        entry: StatusHistoryEntry,
        metadata: Option<OperationMetadata>,
    ) -> Result<Case, PortError>;

    /// Computes totals, per-status counts and the most recent cases
    async fn fetch_aggregate_stats(
        &self,
        metadata: Option<OperationMetadata>,
    ) -> Result<CaseStats, PortError>;
}

/// Storage for uploaded identity documents
#[async_trait]
pub trait DocumentStore: DomainPort + HealthCheckable {
    /// Records an uploaded document for a case, replacing one of the same type
    async fn record_document(
        &self,
        client_id: ClientId,
        document_type: DocumentType,
        info: DocumentInfo,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;

    /// Lists the documents recorded for a case, ordered by type
    async fn list_documents(
        &self,
        client_id: ClientId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<(DocumentType, DocumentInfo)>, PortError>;
}
