//! Verification record entity pinning a static code to a phone number.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Verification record for a phone number
///
/// A record is created the first time a phone number submits a code; that
/// code is canonical for the life of the record and every later submission
/// must match it exactly. Records are never mutated or deleted by this
/// component; expiry, if any, is an external concern on the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// E.164 phone number keying the record (caller-validated, treated as opaque)
    pub phone: String,

    /// The pinned verification code, immutable after creation
    pub code: String,

    /// Seconds since epoch when the record was created
    pub created_at: i64,

    /// Seconds since epoch of the last update
    ///
    /// Equal to `created_at`; this component never refreshes it after
    /// creation, matched verifications included.
    pub updated_at: i64,
}

impl VerificationRecord {
    /// Creates a new record for a first-time phone number
    ///
    /// Both timestamps are set to the current time.
    ///
    /// # Arguments
    ///
    /// * `phone` - The phone number keying the record (with country code)
    /// * `code` - The verification code to pin
    pub fn new(phone: impl Into<String>, code: impl Into<String>) -> Self {
        let now = Utc::now().timestamp();

        Self {
            phone: phone.into(),
            code: code.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks a submitted code against the pinned code
    ///
    /// Comparison is exact, case-sensitive, byte-for-byte string equality.
    pub fn matches(&self, input_code: &str) -> bool {
        self.code == input_code
    }
}
