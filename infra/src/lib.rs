//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the static verification
//! code store. It provides the Redis-backed implementation of the record
//! repository defined in `sv_core`, along with connection management and
//! configuration loading.
//!
//! ## Architecture
//!
//! - **Store**: Redis client wrapper and the verification record repository
//! - **Config**: Store settings loaded from the environment

// Re-export core types for convenience
pub use sv_core::errors::*;

/// Store module - Redis client and verification record repository
pub mod store;

/// Configuration module for the store
pub mod config;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis store error
    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for sv_core::errors::DomainError {
    fn from(error: InfrastructureError) -> Self {
        sv_core::errors::DomainError::Store {
            message: error.to_string(),
        }
    }
}
