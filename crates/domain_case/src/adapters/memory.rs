//! In-memory adapters
//!
//! State lives in `Arc<RwLock<HashMap<..>>>` so clones of an adapter share
//! the same data.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use rand::distributions::Alphanumeric;
use rand::Rng;

use core_kernel::{
    ClientId, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata,
    PortError, UserId,
};

use crate::account::{IssuedCredentials, UserAccount};
use crate::case::{Case, DocumentInfo, DocumentType};
use crate::history::StatusHistoryEntry;
use crate::ports::{AccountDirectory, CaseQuery, CaseStore, DocumentStore};
use crate::role::Role;
use crate::stats::CaseStats;

/// Length of generated client passwords
pub const GENERATED_PASSWORD_LEN: usize = 12;

fn healthy(adapter_id: &str, entries: usize) -> HealthCheckResult {
    HealthCheckResult::healthy(adapter_id).with_message(format!("{} entries in memory", entries))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Random alphanumeric password, uniform over `[A-Za-z0-9]`
fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

#[derive(Debug, Clone)]
struct StoredAccount {
    account: UserAccount,
    password: String,
}

/// Account directory keeping logins in memory
///
/// Passwords are compared as given; hashing belongs to a real identity
/// provider.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountDirectory {
    accounts: Arc<RwLock<HashMap<UserId, StoredAccount>>>,
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an account with a known password
    pub async fn insert_account(&self, account: UserAccount, password: impl Into<String>) {
        let stored = StoredAccount {
            account,
            password: password.into(),
        };
        self.accounts.write().await.insert(stored.account.id, stored);
    }

    /// Creates the initial admin login unless one already uses this email
    pub async fn seed_admin(&self, email: &str, password: &str) -> UserAccount {
        let email = normalize_email(email);
        if let Some(existing) = self.find_by_email(&email).await {
            debug!(email = %email, "Admin account already present");
            return existing.account;
        }

        let account = UserAccount::new(email, Role::Admin, None);
        self.insert_account(account.clone(), password).await;
        account
    }

    /// Marks an account inactive; later logins are rejected
    pub async fn deactivate(&self, id: UserId) -> Result<(), PortError> {
        let mut accounts = self.accounts.write().await;
        let stored = accounts
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("UserAccount", id))?;
        stored.account.is_active = false;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Option<StoredAccount> {
        self.accounts
            .read()
            .await
            .values()
            .find(|s| s.account.email == email)
            .cloned()
    }
}

impl DomainPort for InMemoryAccountDirectory {}

#[async_trait]
impl HealthCheckable for InMemoryAccountDirectory {
    async fn health_check(&self) -> HealthCheckResult {
        healthy("memory-account-directory", self.accounts.read().await.len())
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
        _metadata: Option<OperationMetadata>,
    ) -> Result<UserAccount, PortError> {
        let email = normalize_email(email);
        let stored = self
            .find_by_email(&email)
            .await
            .filter(|s| s.password == password)
            .ok_or_else(|| PortError::unauthorized("Incorrect email or password"))?;

        if !stored.account.is_active {
            warn!(user_id = %stored.account.id, "Login attempt on inactive account");
            return Err(PortError::unauthorized("Account is inactive"));
        }

        Ok(stored.account)
    }

    async fn get_account(
        &self,
        id: UserId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<UserAccount, PortError> {
        self.accounts
            .read()
            .await
            .get(&id)
            .map(|s| s.account.clone())
            .ok_or_else(|| PortError::not_found("UserAccount", id))
    }

    async fn register_client(
        &self,
        email: &str,
        client_id: ClientId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<IssuedCredentials, PortError> {
        let email = normalize_email(email);
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|s| s.account.email == email) {
            return Err(PortError::conflict(format!("Email already registered: {}", email)));
        }

        let account = UserAccount::new(email.clone(), Role::Client, Some(client_id));
        let password = generate_password();
        let credentials = IssuedCredentials {
            user_id: account.id,
            email,
            password: password.clone(),
        };
        accounts.insert(account.id, StoredAccount { account, password });

        Ok(credentials)
    }

    async fn email_registered(
        &self,
        email: &str,
        _metadata: Option<OperationMetadata>,
    ) -> Result<bool, PortError> {
        Ok(self.find_by_email(&normalize_email(email)).await.is_some())
    }
}

/// Case store keeping cases in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCaseStore {
    cases: Arc<RwLock<HashMap<ClientId, Case>>>,
}

impl InMemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the store
    pub async fn with_cases(cases: Vec<Case>) -> Self {
        let store = Self::new();
        {
            let mut map = store.cases.write().await;
            for case in cases {
                map.insert(case.id, case);
            }
        }
        store
    }
}

impl DomainPort for InMemoryCaseStore {}

#[async_trait]
impl HealthCheckable for InMemoryCaseStore {
    async fn health_check(&self) -> HealthCheckResult {
        healthy("memory-case-store", self.cases.read().await.len())
    }
}

#[async_trait]
impl CaseStore for InMemoryCaseStore {
    async fn fetch_case(
        &self,
        id: ClientId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Case, PortError> {
        self.cases
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Case", id))
    }

    async fn list_cases(
        &self,
        query: CaseQuery,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Vec<Case>, PortError> {
        let cases = self.cases.read().await;
        let mut results: Vec<Case> = cases.values().filter(|c| query.matches(c)).cloned().collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if let Some(limit) = query.limit {
            results.truncate(limit as usize);
        }

        Ok(results)
    }

    async fn insert_case(
        &self,
        case: Case,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        let mut cases = self.cases.write().await;
        if cases.contains_key(&case.id) {
            return Err(PortError::conflict(format!("Case already exists: {}", case.id)));
        }
        cases.insert(case.id, case);
        Ok(())
    }

    async fn append_status(
        &self,
        id: ClientId,
        entry: StatusHistoryEntry,
        metadata: Option<OperationMetadata>,
    ) -> Result<Case, PortError> {
        let mut cases = self.cases.write().await;
        let case = cases
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Case", id))?;
        debug!(
            client_id = %id,
            status = %entry.status(),
            initiated_by = ?metadata.and_then(|m| m.initiated_by),
            "Appending status entry"
        );
        case.apply_transition(entry);
        Ok(case.clone())
    }

    async fn fetch_aggregate_stats(
        &self,
        _metadata: Option<OperationMetadata>,
    ) -> Result<CaseStats, PortError> {
        let cases = self.cases.read().await;
        Ok(CaseStats::from_cases(cases.values()))
    }
}

/// Document store keeping metadata in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<ClientId, HashMap<DocumentType, DocumentInfo>>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryDocumentStore {}

#[async_trait]
impl HealthCheckable for InMemoryDocumentStore {
    async fn health_check(&self) -> HealthCheckResult {
        healthy("memory-document-store", self.documents.read().await.len())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn record_document(
        &self,
        client_id: ClientId,
        document_type: DocumentType,
        info: DocumentInfo,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        self.documents
            .write()
            .await
            .entry(client_id)
            .or_default()
            .insert(document_type, info);
        Ok(())
    }

    async fn list_documents(
        &self,
        client_id: ClientId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Vec<(DocumentType, DocumentInfo)>, PortError> {
        let documents = self.documents.read().await;
        let mut listed: Vec<_> = documents
            .get(&client_id)
            .map(|docs| docs.iter().map(|(k, v)| (*k, v.clone())).collect())
            .unwrap_or_default();
        listed.sort_by_key(|(kind, _)| *kind);
        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_generated_password_shape() {
        let password = generate_password();
        assert_eq!(password.len(), GENERATED_PASSWORD_LEN);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(password, generate_password());
    }

    #[test]
    fn test_every_position_covers_the_alphabet() {
        let passwords: Vec<Vec<char>> = (0..5_000)
            .map(|_| generate_password().chars().collect())
            .collect();

        for position in 0..GENERATED_PASSWORD_LEN {
            let seen: std::collections::HashSet<char> =
                passwords.iter().map(|p| p[position]).collect();
            assert_eq!(seen.len(), 62, "position {} saw {} characters", position, seen.len());
        }
    }

    #[tokio::test]
    async fn test_seed_admin_is_idempotent() {
        let directory = InMemoryAccountDirectory::new();
        let first = directory.seed_admin("Admin@Example.com", "secret").await;
        let second = directory.seed_admin("admin@example.com", "other").await;
        assert_eq!(first.id, second.id);
        assert_eq!(first.email, "admin@example.com");

        let account = directory.authenticate("admin@example.com", "secret", None).await.unwrap();
        assert_eq!(account.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_authenticate_rejects_wrong_password_and_inactive() {
        let directory = InMemoryAccountDirectory::new();
        let admin = directory.seed_admin("admin@example.com", "secret").await;

        let err = directory.authenticate("admin@example.com", "nope", None).await.unwrap_err();
        assert!(err.is_unauthorized());

        directory.deactivate(admin.id).await.unwrap();
        let err = directory.authenticate("admin@example.com", "secret", None).await.unwrap_err();
        assert!(err.to_string().contains("inactive"));
    }

    #[tokio::test]
    async fn test_register_client_rejects_duplicate_email() {
        let directory = InMemoryAccountDirectory::new();
        let credentials = directory
            .register_client("jane@example.com", ClientId::new(), None)
            .await
            .unwrap();

        let account = directory
            .authenticate("JANE@example.com", &credentials.password, None)
            .await
            .unwrap();
        assert_eq!(account.role, Role::Client);

        let err = directory
            .register_client(" jane@example.com ", ClientId::new(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Conflict { .. }));
        assert!(directory.email_registered("jane@example.com", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_document_store_replaces_same_type() {
        let store = InMemoryDocumentStore::new();
        let client_id = ClientId::new();
        for name in ["old.pdf", "new.pdf"] {
            let info = DocumentInfo {
                file_id: core_kernel::FileId::new(),
                filename: name.to_string(),
                size_bytes: 10,
                uploaded_at: Utc::now(),
            };
            store
                .record_document(client_id, DocumentType::DriverLicense, info, None)
                .await
                .unwrap();
        }

        let listed = store.list_documents(client_id, None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].1.filename, "new.pdf");
        assert!(store.list_documents(ClientId::new(), None).await.unwrap().is_empty());
    }
}
