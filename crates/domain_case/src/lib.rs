//! Case Management Domain
//!
//! This crate implements the credit-repair case lifecycle: intake of an
//! applicant's submission, the status engine that interprets where a case
//! stands, the admin-only transition rule, and the append-only status history.
//!
//! # Case Lifecycle
//!
//! ```text
//! pending -> documents_verified -> freeze_completed -> letters_sent
//!         -> ftc_created -> cfpb_filed -> result_received -> completed
//! ```
//!
//! The engine itself (`describe`, `classify`, `can_transition`,
//! `record_transition`) is pure. Persistence and identity sit behind the port
//! traits in [`ports`]; [`adapters`] ships in-memory implementations.

pub mod status;
pub mod stage;
pub mod role;
pub mod history;
pub mod transition;
pub mod case;
pub mod intake;
pub mod account;
pub mod stats;
pub mod locale;
pub mod ports;
pub mod adapters;
pub mod service;
pub mod error;

pub use status::CaseStatus;
pub use stage::{
    StageDescriptor, StageClass, StatusDisplay, TimelineStep,
    describe, describe_str, display_status, classify, timeline, next_stage,
};
pub use role::{Role, Actor, can_transition, ensure_can_transition};
pub use history::StatusHistoryEntry;
pub use transition::record_transition;
pub use case::{
    Case, ApplicantIdentity, PostalAddress, GovernmentId,
    DocumentType, DocumentInfo, DocumentIndex,
};
pub use intake::{ClientSubmission, DocumentUpload};
pub use account::{UserAccount, IssuedCredentials};
pub use stats::{CaseStats, CaseSummary};
pub use locale::{Locale, StageCatalog};
pub use ports::{AccountDirectory, CaseStore, DocumentStore, CaseQuery};
pub use adapters::{InMemoryAccountDirectory, InMemoryCaseStore, InMemoryDocumentStore};
pub use service::{CaseService, CaseDetail, SubmissionReceipt};
pub use error::CaseError;
