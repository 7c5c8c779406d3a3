//! Business services built on top of the repository interfaces.

pub mod static_code;

pub use static_code::{StaticCodeService, VerificationOutcome};
