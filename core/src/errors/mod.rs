//! Domain-specific error types and error handling.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// The backing key-value store failed (network, throttling, malformed response)
    #[error("Store error: {message}")]
    Store { message: String },

    /// Internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;
