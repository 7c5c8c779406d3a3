//! Repository interfaces for persistence operations.

pub mod verification_code;

pub use verification_code::VerificationCodeRepository;
