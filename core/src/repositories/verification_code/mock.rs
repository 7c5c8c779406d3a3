//! In-memory mock repository for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::r#trait::VerificationCodeRepository;
use crate::domain::entities::VerificationRecord;
use crate::errors::DomainError;

/// Mock verification code repository backed by a HashMap
///
/// Set `should_fail` to simulate a degraded store: every operation returns
/// `DomainError::Store`.
pub struct MockVerificationCodeRepository {
    pub records: Arc<Mutex<HashMap<String, VerificationRecord>>>,
    pub should_fail: bool,
}

impl MockVerificationCodeRepository {
    pub fn new(should_fail: bool) -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    /// Read the stored record directly, bypassing the trait
    pub fn stored_record(&self, phone: &str) -> Option<VerificationRecord> {
        self.records.lock().unwrap().get(phone).cloned()
    }

    /// Number of records currently stored
    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl VerificationCodeRepository for MockVerificationCodeRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<VerificationRecord>, DomainError> {
        if self.should_fail {
            return Err(DomainError::Store {
                message: "mock store failure".to_string(),
            });
        }
        Ok(self.records.lock().unwrap().get(phone).cloned())
    }

    async fn insert_if_absent(&self, record: &VerificationRecord) -> Result<bool, DomainError> {
        if self.should_fail {
            return Err(DomainError::Store {
                message: "mock store failure".to_string(),
            });
        }

        let mut records = self.records.lock().unwrap();
        if records.contains_key(&record.phone) {
            Ok(false)
        } else {
            records.insert(record.phone.clone(), record.clone());
            Ok(true)
        }
    }
}
