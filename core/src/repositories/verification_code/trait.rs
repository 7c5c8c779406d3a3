//! Verification code repository trait defining the interface for record persistence.

use async_trait::async_trait;

use crate::domain::entities::VerificationRecord;
use crate::errors::DomainError;

/// Repository trait for VerificationRecord persistence operations
///
/// The backing store is a key-value table keyed by phone number, offering
/// single-key point lookups and writes. Implementations are injected into
/// the service so tests can substitute an in-memory fake.
///
/// # Consistency
/// `insert_if_absent` must be atomic at the store level: when two first-time
/// writers race on the same phone number, exactly one call observes `true`
/// and its record is the one that survives.
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Find the verification record for a phone number
    ///
    /// # Arguments
    /// * `phone` - The phone number keying the record
    ///
    /// # Returns
    /// * `Ok(Some(VerificationRecord))` - Record found
    /// * `Ok(None)` - No record exists for this phone number
    /// * `Err(DomainError)` - Store failure
    async fn find_by_phone(&self, phone: &str) -> Result<Option<VerificationRecord>, DomainError>;

    /// Create a record only if none exists for its phone number
    ///
    /// Never overwrites an existing record, whatever its contents.
    ///
    /// # Arguments
    /// * `record` - The record to persist
    ///
    /// # Returns
    /// * `Ok(true)` - The record was created by this call
    /// * `Ok(false)` - A record already existed; nothing was written
    /// * `Err(DomainError)` - Store failure
    async fn insert_if_absent(&self, record: &VerificationRecord) -> Result<bool, DomainError>;

    /// Check whether a record exists for a phone number
    ///
    /// # Returns
    /// * `Ok(true)` - A record exists
    /// * `Ok(false)` - No record for this phone number
    /// * `Err(DomainError)` - Store failure
    async fn exists(&self, phone: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_phone(phone).await?.is_some())
    }
}
