//! Client errors

use thiserror::Error;

/// Errors surfaced to the portal's presentation layer
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Token missing, invalid or expired; the session must be dropped
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// A response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// The persisted token could not be read or written
    #[error("Token store error: {0}")]
    TokenStore(String),

    /// An authenticated call was attempted without a session
    #[error("Not logged in")]
    NotLoggedIn,
}

impl ClientError {
    /// True when the caller should clear the stored token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_) | ClientError::NotLoggedIn)
    }
}
