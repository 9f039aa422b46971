//! Case application service
//!
//! Orchestrates the ports for the operations the portal exposes: intake,
//! login, the client's own case view, and the admin operations. Authorization
//! checks live here so every surface enforces the same rules.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use core_kernel::{ClientId, HealthCheckResult, OperationMetadata, PortError, UserId};

use crate::account::UserAccount;
use crate::case::{Case, DocumentInfo, DocumentType};
use crate::error::CaseError;
use crate::intake::ClientSubmission;
use crate::ports::{AccountDirectory, CaseQuery, CaseStore, DocumentStore};
use crate::role::{Actor, Role};
use crate::stats::CaseStats;
use crate::status::CaseStatus;
use crate::transition::record_transition;

/// Result of a successful intake
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub client_id: ClientId,
    /// Login email of the new client account
    pub email: String,
    /// Generated password, shown to the applicant once
    pub password: String,
    pub case: Case,
}

/// A case together with its stored document metadata
#[derive(Debug, Clone)]
pub struct CaseDetail {
    pub case: Case,
    /// Ordered by document type
    pub documents: Vec<(DocumentType, DocumentInfo)>,
}

/// Service fronting the case, document and account ports
#[derive(Clone)]
pub struct CaseService {
    store: Arc<dyn CaseStore>,
    documents: Arc<dyn DocumentStore>,
    directory: Arc<dyn AccountDirectory>,
}

fn metadata_for(actor: &Actor) -> Option<OperationMetadata> {
    Some(OperationMetadata::initiated_by(actor.user_id))
}

fn require_admin(actor: &Actor) -> Result<(), CaseError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(CaseError::AccessDenied(actor.role))
    }
}

impl CaseService {
    pub fn new(
        store: Arc<dyn CaseStore>,
        documents: Arc<dyn DocumentStore>,
        directory: Arc<dyn AccountDirectory>,
    ) -> Self {
        Self {
            store,
            documents,
            directory,
        }
    }

    /// Verifies login credentials
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<UserAccount, CaseError> {
        let account = self.directory.authenticate(email, password, None).await?;
        info!(user_id = %account.id, role = %account.role, "User authenticated");
        Ok(account)
    }

    /// Resolves the account behind a session
    ///
    /// A missing or inactive account is reported as `Unauthorized` so the
    /// caller drops the session.
    pub async fn current_account(&self, user_id: UserId) -> Result<UserAccount, CaseError> {
        let account = match self.directory.get_account(user_id, None).await {
            Ok(account) => account,
            Err(PortError::NotFound { .. }) => {
                return Err(CaseError::Unauthorized("User not found".to_string()));
            }
            Err(other) => return Err(other.into()),
        };

        if !account.is_active {
            return Err(CaseError::Unauthorized("Account is inactive".to_string()));
        }
        Ok(account)
    }

    /// Validates a submission, opens the case and creates the client login
    ///
    /// # Errors
    ///
    /// * `ValidationFailed` - a field or required document is invalid
    /// * `Conflict` - the email already belongs to an account
    pub async fn submit_application(
        &self,
        submission: ClientSubmission,
    ) -> Result<SubmissionReceipt, CaseError> {
        let email = submission.login_email();
        if self.directory.email_registered(&email, None).await? {
            return Err(CaseError::Conflict("Email already registered".to_string()));
        }

        let mut case = submission.into_case(Utc::now())?;
        let credentials = self.directory.register_client(&email, case.id, None).await?;
        case.owner_id = Some(credentials.user_id);

        let metadata = Some(OperationMetadata::initiated_by(credentials.user_id));
        for (kind, info) in &case.documents {
            self.documents
                .record_document(case.id, *kind, info.clone(), metadata)
                .await?;
        }
        self.store.insert_case(case.clone(), metadata).await?;

        info!(client_id = %case.id, user_id = %credentials.user_id, "Client application submitted");

        Ok(SubmissionReceipt {
            client_id: case.id,
            email: credentials.email,
            password: credentials.password,
            case,
        })
    }

    /// The case owned by a client account
    pub async fn client_case(&self, account: &UserAccount) -> Result<Case, CaseError> {
        if account.role != Role::Client {
            return Err(CaseError::AccessDenied(account.role));
        }
        let client_id = account
            .client_id
            .ok_or_else(|| CaseError::CaseNotFound(format!("no case for account {}", account.id)))?;

        Ok(self.store.fetch_case(client_id, metadata_for(&account.actor())).await?)
    }

    /// A case with its documents; admins only
    pub async fn fetch_case(&self, actor: &Actor, id: ClientId) -> Result<CaseDetail, CaseError> {
        require_admin(actor)?;
        let case = self.store.fetch_case(id, metadata_for(actor)).await?;
        let documents = self.documents.list_documents(id, metadata_for(actor)).await?;
        Ok(CaseDetail { case, documents })
    }

    /// Cases matching a query, newest first; admins only
    pub async fn list_cases(&self, actor: &Actor, query: CaseQuery) -> Result<Vec<Case>, CaseError> {
        require_admin(actor)?;
        Ok(self.store.list_cases(query, metadata_for(actor)).await?)
    }

    /// Moves a case to a new status and records who did it
    ///
    /// # Errors
    ///
    /// * `ForbiddenTransition` - the actor is not an admin
    /// * `NoOpUpdate` - same status and no note
    /// * `CaseNotFound` - unknown case
    pub async fn update_case_status(
        &self,
        actor: &Actor,
        id: ClientId,
        to: CaseStatus,
        note: &str,
    ) -> Result<Case, CaseError> {
        let case = self.store.fetch_case(id, metadata_for(actor)).await?;
        let from = case.status();

        let entry = match record_transition(&case, to, note, actor) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(client_id = %id, actor = %actor.user_id, error = %err, "Status update rejected");
                return Err(err);
            }
        };

        let updated = self.store.append_status(id, entry, metadata_for(actor)).await?;
        info!(
            client_id = %id,
            from = %from,
            to = %updated.status(),
            actor = %actor.user_id,
            "Case status updated"
        );
        Ok(updated)
    }

    /// Dashboard statistics; admins only
    pub async fn stats(&self, actor: &Actor) -> Result<CaseStats, CaseError> {
        require_admin(actor)?;
        Ok(self.store.fetch_aggregate_stats(metadata_for(actor)).await?)
    }

    /// Health of every backing adapter
    pub async fn health(&self) -> Vec<HealthCheckResult> {
        vec![
            self.store.health_check().await,
            self.documents.health_check().await,
            self.directory.health_check().await,
        ]
    }
}
