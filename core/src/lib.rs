//! # StaticVerify Core
//!
//! Core domain layer for the static verification code store. This crate
//! contains the verification record entity, the repository interface for the
//! backing key-value store, domain error types, and the service that pins a
//! verification code to a phone number on first use.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
