//! Types for static code verification results

use crate::errors::DomainError;

/// Outcome of a single verification attempt
///
/// [`StaticCodeService::verify_and_store`](super::StaticCodeService::verify_and_store)
/// collapses this into a boolean for callers that only need pass/fail; the
/// distinct variants let callers separate a wrong code from a degraded store.
#[derive(Debug)]
pub enum VerificationOutcome {
    /// First submission for this phone number; the code is now pinned
    Created,
    /// Submission matched the pinned code
    Matched,
    /// Submission did not match the pinned code
    Mismatch,
    /// The backing store failed; nothing can be said about the code
    Unavailable(DomainError),
}

impl VerificationOutcome {
    /// Whether this outcome counts as a successful verification
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Created | Self::Matched)
    }
}
