//! Case domain errors

use thiserror::Error;

use core_kernel::PortError;
use crate::role::Role;
use crate::status::CaseStatus;

/// Errors that can occur in the case domain
///
/// Every variant is a recoverable condition; the caller decides how to
/// surface it (message, redirect, session reset).
#[derive(Debug, Error)]
pub enum CaseError {
    /// A status string outside the canonical eight values
    #[error("Unknown case status: {0}")]
    UnknownStatus(String),

    /// The acting role may not move the case between these statuses
    #[error("Role {role} may not change case status from {from} to {to}")]
    ForbiddenTransition {
        role: Role,
        from: CaseStatus,
        to: CaseStatus,
    },

    /// A status update that changes neither the status nor the note
    #[error("No status or notes to update")]
    NoOpUpdate,

    /// Session expired, token invalid, or credentials rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The acting role may not read or act on this resource
    #[error("Access denied for role {0}")]
    AccessDenied(Role),

    #[error("Case not found: {0}")]
    CaseNotFound(String),

    /// Submission or request data failed validation
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A translation resource failed to load
    #[error("Localization error: {0}")]
    Localization(String),

    #[error(transparent)]
    Port(PortError),
}

impl CaseError {
    /// Creates a CaseNotFound error from any ID type
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        CaseError::CaseNotFound(id.to_string())
    }

    /// Creates a ValidationFailed error from a list of field errors
    pub fn validation_failed(errors: Vec<String>) -> Self {
        CaseError::ValidationFailed(errors.join("; "))
    }

    /// True when the caller should drop its session and log in again
    pub fn is_unauthorized(&self) -> bool {
        match self {
            CaseError::Unauthorized(_) => true,
            CaseError::Port(port) => port.is_unauthorized(),
            _ => false,
        }
    }
}

impl From<PortError> for CaseError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { id, .. } => CaseError::CaseNotFound(id),
            PortError::Unauthorized { message } => CaseError::Unauthorized(message),
            PortError::Conflict { message } => CaseError::Conflict(message),
            other => CaseError::Port(other),
        }
    }
}
