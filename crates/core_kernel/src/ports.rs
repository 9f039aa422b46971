//! Port errors, adapter health and per-call metadata
//!
//! The case domain declares its port traits (account directory, case store,
//! document store) on the marker traits here. Adapters live next to the
//! ports: in memory for development and tests, or against the backend of
//! record.
//!
//! ```text
//!   CaseService / HTTP handlers
//!              │
//!              ▼
//!   AccountDirectory, CaseStore, DocumentStore   (domain_case::ports)
//!              ▲
//!              │
//!   in-memory adapters | external backend
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifiers::UserId;

/// Failure reported by an adapter
#[derive(Debug, Error)]
pub enum PortError {
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// Duplicate key, e.g. an email that is already registered
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Credentials rejected or account disabled
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The backing store could not be reached; retrying may help
    #[error("Unavailable: {message}")]
    Unavailable { message: String },

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        PortError::Unauthorized {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        PortError::Unavailable {
            message: message.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, PortError::Unauthorized { .. })
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared behind an `Arc` across request handlers.
pub trait DomainPort: Send + Sync + 'static {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Unhealthy,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    pub latency_ms: u64,
    pub message: Option<String>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    pub fn healthy(adapter_id: impl Into<String>) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Healthy,
            latency_ms: 0,
            message: None,
            checked_at: chrono::Utc::now(),
        }
    }

    /// An adapter that cannot serve requests, e.g. an unreachable backend
    pub fn unhealthy(adapter_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: AdapterHealth::Unhealthy,
            ..Self::healthy(adapter_id)
        }
        .with_message(message)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// True when the adapter can serve requests
    pub fn is_operational(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

/// Trait for adapters that support health checks
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}

/// Who a port call is made for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationMetadata {
    /// `None` for anonymous calls such as intake
    pub initiated_by: Option<UserId>,
}

impl OperationMetadata {
    pub fn initiated_by(user_id: UserId) -> Self {
        Self {
            initiated_by: Some(user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_messages() {
        let error = PortError::not_found("Case", "123");
        assert_eq!(error.to_string(), "Not found: Case with id 123");
        assert_eq!(
            PortError::unavailable("case store offline").to_string(),
            "Unavailable: case store offline"
        );
        assert_eq!(
            PortError::conflict("Email already registered").to_string(),
            "Conflict: Email already registered"
        );
    }

    #[test]
    fn test_port_error_unauthorized() {
        assert!(PortError::unauthorized("Incorrect email or password").is_unauthorized());
        assert!(!PortError::not_found("Case", "123").is_unauthorized());
    }

    #[test]
    fn test_health_check_result_operational() {
        let result = HealthCheckResult::healthy("memory-case-store").with_message("3 entries");
        assert!(result.is_operational());
        assert_eq!(result.message.as_deref(), Some("3 entries"));

        let result = HealthCheckResult::unhealthy("case-backend", "connection refused");
        assert_eq!(result.status, AdapterHealth::Unhealthy);
        assert!(!result.is_operational());
        assert_eq!(result.message.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_operation_metadata() {
        let user = UserId::new();
        assert_eq!(OperationMetadata::initiated_by(user).initiated_by, Some(user));
        assert!(OperationMetadata::default().initiated_by.is_none());
    }
}
