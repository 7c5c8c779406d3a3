//! Static verification code service implementation

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::entities::VerificationRecord;
use crate::repositories::VerificationCodeRepository;

use super::types::VerificationOutcome;

/// Service managing static verification codes for phone numbers
///
/// When a phone number is first used, the submitted code is stored as its
/// canonical code. Subsequent verifications must use the same code. The
/// backing repository is injected so tests can substitute an in-memory fake.
pub struct StaticCodeService {
    /// Backing key-value repository
    repository: Arc<dyn VerificationCodeRepository>,
}

impl StaticCodeService {
    /// Create a new service on top of a verification code repository
    ///
    /// # Arguments
    /// * `repository` - The record store (Redis-backed in production)
    pub fn new(repository: Arc<dyn VerificationCodeRepository>) -> Self {
        Self { repository }
    }

    /// Verify a code for a phone number, pinning it on first use
    ///
    /// If no record exists for the phone number, the submitted code becomes
    /// canonical and the call succeeds. Otherwise the submission must match
    /// the stored code byte-for-byte.
    ///
    /// Returns `false` on mismatch and on any store failure (fail closed);
    /// use [`verify`](Self::verify) when those two need to be distinguished.
    ///
    /// # Arguments
    /// * `phone` - The E.164 formatted phone number
    /// * `input_code` - The verification code to verify
    pub async fn verify_and_store(&self, phone: &str, input_code: &str) -> bool {
        self.verify(phone, input_code).await.is_success()
    }

    /// Verify a code for a phone number, reporting the distinct outcome
    ///
    /// Same semantics as [`verify_and_store`](Self::verify_and_store), but
    /// store failures surface as [`VerificationOutcome::Unavailable`] instead
    /// of being folded into a failed verification.
    pub async fn verify(&self, phone: &str, input_code: &str) -> VerificationOutcome {
        let existing = match self.repository.find_by_phone(phone).await {
            Ok(existing) => existing,
            Err(e) => {
                error!(
                    phone = %Self::mask_phone(phone),
                    error = %e,
                    "Failed to look up verification record"
                );
                return VerificationOutcome::Unavailable(e);
            }
        };

        match existing {
            None => self.pin_code(phone, input_code).await,
            Some(record) => Self::compare(phone, &record, input_code),
        }
    }

    /// Retrieve the stored verification code for a phone number
    ///
    /// Returns `None` when no record exists and when the store fails; the
    /// failure is logged and swallowed to keep the lookup side-effect free
    /// for callers. No record is ever created here.
    ///
    /// # Arguments
    /// * `phone` - The E.164 formatted phone number
    pub async fn get_stored_code(&self, phone: &str) -> Option<String> {
        match self.repository.find_by_phone(phone).await {
            Ok(record) => record.map(|r| r.code),
            Err(e) => {
                error!(
                    phone = %Self::mask_phone(phone),
                    error = %e,
                    "Failed to retrieve verification record, treating as absent"
                );
                None
            }
        }
    }

    /// Pin a code for a first-time phone number
    ///
    /// Creation goes through the repository's put-if-absent primitive, so a
    /// concurrent first-time writer cannot overwrite an already pinned code.
    /// The loser of that race falls back to comparing against the winner's
    /// record.
    async fn pin_code(&self, phone: &str, input_code: &str) -> VerificationOutcome {
        let record = VerificationRecord::new(phone, input_code);

        match self.repository.insert_if_absent(&record).await {
            Ok(true) => {
                info!(
                    phone = %Self::mask_phone(phone),
                    "Created new static verification code record"
                );
                VerificationOutcome::Created
            }
            Ok(false) => {
                // A concurrent writer pinned a code between our lookup and
                // the insert; re-read and compare against it.
                match self.repository.find_by_phone(phone).await {
                    Ok(Some(existing)) => Self::compare(phone, &existing, input_code),
                    Ok(None) => {
                        warn!(
                            phone = %Self::mask_phone(phone),
                            "Record vanished after losing first-write race"
                        );
                        VerificationOutcome::Mismatch
                    }
                    Err(e) => {
                        error!(
                            phone = %Self::mask_phone(phone),
                            error = %e,
                            "Failed to re-read record after losing first-write race"
                        );
                        VerificationOutcome::Unavailable(e)
                    }
                }
            }
            Err(e) => {
                error!(
                    phone = %Self::mask_phone(phone),
                    error = %e,
                    "Failed to create verification record"
                );
                VerificationOutcome::Unavailable(e)
            }
        }
    }

    /// Compare a submission against an existing record
    fn compare(
        phone: &str,
        record: &VerificationRecord,
        input_code: &str,
    ) -> VerificationOutcome {
        if record.matches(input_code) {
            debug!(
                phone = %Self::mask_phone(phone),
                "Static verification code verified successfully"
            );
            VerificationOutcome::Matched
        } else {
            warn!(
                phone = %Self::mask_phone(phone),
                "Static verification code mismatch"
            );
            VerificationOutcome::Mismatch
        }
    }

    /// Mask phone number for logging (show only last 4 digits)
    fn mask_phone(phone: &str) -> String {
        if phone.len() <= 4 {
            "****".to_string()
        } else {
            format!("***{}", &phone[phone.len() - 4..])
        }
    }
}
