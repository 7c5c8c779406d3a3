//! Static verification code service
//!
//! Manages static verification codes for phone numbers. The first code
//! submitted for a phone number is stored as canonical; every subsequent
//! verification for that number must use the same code. Records are never
//! updated or deleted here.

mod service;
mod types;


pub use service::StaticCodeService;
pub use types::VerificationOutcome;
