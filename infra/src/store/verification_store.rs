//! Redis-backed verification record repository
//!
//! Each phone number maps to one Redis hash under `static_code:{phone}` with
//! fields:
//! - `verification_code` - the pinned code, written once via `HSETNX`
//! - `created_at` - seconds since epoch, set at creation
//! - `updated_at` - seconds since epoch, set at creation and never refreshed
//!
//! Records carry no TTL; expiry, if any, is an administrative concern.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use sv_core::domain::entities::VerificationRecord;
use sv_core::errors::DomainError;
use sv_core::repositories::VerificationCodeRepository;

use crate::config::StoreConfig;
use crate::store::RedisClient;
use crate::InfrastructureError;

/// Key namespace for verification record hashes
const KEY_NAMESPACE: &str = "static_code";

/// Build the Redis key for a phone number's record hash
pub(crate) fn format_record_key(prefix: Option<&str>, phone: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}:{}", prefix, KEY_NAMESPACE, phone),
        None => format!("{}:{}", KEY_NAMESPACE, phone),
    }
}

/// Hash field holding the pinned verification code
pub const FIELD_VERIFICATION_CODE: &str = "verification_code";

/// Hash field holding the creation timestamp (seconds since epoch)
pub const FIELD_CREATED_AT: &str = "created_at";

/// Hash field holding the last-update timestamp (seconds since epoch)
pub const FIELD_UPDATED_AT: &str = "updated_at";

/// Redis implementation of the verification code repository
#[derive(Clone)]
pub struct RedisVerificationCodeRepository {
    /// Redis client for store operations
    client: RedisClient,
    /// Optional prefix prepended to every record key
    key_prefix: Option<String>,
}

impl RedisVerificationCodeRepository {
    /// Create a new repository on top of an existing Redis client
    ///
    /// # Arguments
    /// * `client` - Redis client for store operations
    pub fn new(client: RedisClient) -> Self {
        Self {
            client,
            key_prefix: None,
        }
    }

    /// Create a repository by connecting with the given configuration
    ///
    /// # Arguments
    /// * `config` - Store configuration (URL, timeouts, key prefix)
    pub async fn connect(config: &StoreConfig) -> Result<Self, InfrastructureError> {
        let client = RedisClient::new(config).await?;

        Ok(Self {
            client,
            key_prefix: config.key_prefix.clone(),
        })
    }

    /// Set the prefix prepended to every record key
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Format the Redis key for a phone number's record
    fn format_key(&self, phone: &str) -> String {
        format_record_key(self.key_prefix.as_deref(), phone)
    }

    /// Mask phone number for logging (show only last 4 digits)
    pub(crate) fn mask_phone(phone: &str) -> String {
        if phone.len() <= 4 {
            "****".to_string()
        } else {
            format!("***{}", &phone[phone.len() - 4..])
        }
    }
}

#[async_trait]
impl VerificationCodeRepository for RedisVerificationCodeRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<VerificationRecord>, DomainError> {
        let key = self.format_key(phone);

        let fields = self.client.hash_get_all(&key).await.map_err(DomainError::from)?;

        if fields.is_empty() {
            debug!(
                phone = %Self::mask_phone(phone),
                "No verification record found"
            );
            return Ok(None);
        }

        // A hash without the code field counts as absent, mirroring the
        // point-lookup contract of the original table.
        let code = match fields.get(FIELD_VERIFICATION_CODE) {
            Some(code) => code.clone(),
            None => {
                warn!(
                    phone = %Self::mask_phone(phone),
                    "Record hash exists but lacks the code field, treating as absent"
                );
                return Ok(None);
            }
        };

        let created_at = fields
            .get(FIELD_CREATED_AT)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0);
        let updated_at = fields
            .get(FIELD_UPDATED_AT)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(created_at);

        debug!(
            phone = %Self::mask_phone(phone),
            "Retrieved verification record"
        );

        Ok(Some(VerificationRecord {
            phone: phone.to_string(),
            code,
            created_at,
            updated_at,
        }))
    }

    async fn insert_if_absent(&self, record: &VerificationRecord) -> Result<bool, DomainError> {
        let key = self.format_key(&record.phone);

        // HSETNX on the code field is the atomic first-write gate; only the
        // winner goes on to write the timestamp fields.
        let created = self
            .client
            .hash_set_if_absent(&key, FIELD_VERIFICATION_CODE, &record.code)
            .await
            .map_err(DomainError::from)?;

        if !created {
            debug!(
                phone = %Self::mask_phone(&record.phone),
                "Record already exists, leaving it untouched"
            );
            return Ok(false);
        }

        let timestamps = [
            (FIELD_CREATED_AT.to_string(), record.created_at.to_string()),
            (FIELD_UPDATED_AT.to_string(), record.updated_at.to_string()),
        ];
        self.client
            .hash_set_fields(&key, &timestamps)
            .await
            .map_err(DomainError::from)?;

        info!(
            phone = %Self::mask_phone(&record.phone),
            "Stored new verification record"
        );

        Ok(true)
    }

    async fn exists(&self, phone: &str) -> Result<bool, DomainError> {
        let key = self.format_key(phone);
        self.client.exists(&key).await.map_err(DomainError::from)
    }
}
