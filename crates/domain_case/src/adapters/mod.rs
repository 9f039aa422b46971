//! Adapters for the Case Domain
//!
//! In-memory implementations of [`crate::ports::AccountDirectory`],
//! [`crate::ports::CaseStore`] and [`crate::ports::DocumentStore`]. The API
//! server runs on them in development and every test suite uses them in
//! place of the backend of record.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_case::adapters::{InMemoryAccountDirectory, InMemoryCaseStore, InMemoryDocumentStore};
//! use domain_case::CaseService;
//!
//! let directory = Arc::new(InMemoryAccountDirectory::new());
//! directory.seed_admin("admin@example.com", "change-me").await;
//!
//! let service = CaseService::new(
//!     Arc::new(InMemoryCaseStore::new()),
//!     Arc::new(InMemoryDocumentStore::new()),
//!     directory,
//! );
//! ```

pub mod memory;

pub use memory::{InMemoryAccountDirectory, InMemoryCaseStore, InMemoryDocumentStore};
