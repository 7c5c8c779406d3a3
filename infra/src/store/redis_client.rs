//! Redis store client implementation
//!
//! This module provides a Redis client with connection management, retry
//! logic, and the hash operations the verification record table needs:
//! point lookups (`HGETALL`), conditional field creation (`HSETNX`), and
//! bulk field writes (`HSET`).

use std::collections::HashMap;
use std::time::Duration;

use redis::{
    aio::MultiplexedConnection,
    AsyncCommands, Client, RedisError, RedisResult,
};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::StoreConfig;
use crate::InfrastructureError;

/// Redis store client with retry logic
///
/// Wraps a multiplexed async connection and retries transient failures with
/// exponential backoff.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Maximum number of retry attempts for operations
    max_retries: u32,
    /// Base delay between retries in milliseconds (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Arguments
    /// * `config` - Store configuration settings
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Redis client or error
    pub async fn new(config: &StoreConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retry_config(config, 3, 100).await
    }

    /// Create a new Redis client with custom retry configuration
    ///
    /// # Arguments
    /// * `config` - Store configuration settings
    /// * `max_retries` - Maximum number of retry attempts
    /// * `retry_delay_ms` - Base delay between retries in milliseconds
    pub async fn new_with_retry_config(
        config: &StoreConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!("Creating Redis store client with URL: {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection =
            Self::create_connection_with_retry(client, max_retries, retry_delay_ms).await?;

        info!("Redis store client created successfully");

        Ok(Self {
            connection,
            max_retries,
            retry_delay_ms,
        })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Store(e));
                }
            }
        }
    }

    /// Get all fields of a hash
    ///
    /// # Arguments
    /// * `key` - Hash key
    ///
    /// # Returns
    /// * `Result<HashMap<String, String>, InfrastructureError>` - Field map,
    ///   empty when the key does not exist
    pub async fn hash_get_all(
        &self,
        key: &str,
    ) -> Result<HashMap<String, String>, InfrastructureError> {
        debug!("Reading hash '{}'", key);

        let result = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();

                Box::pin(async move {
                    conn.hgetall::<_, HashMap<String, String>>(key).await
                })
            })
            .await;

        match result {
            Ok(fields) => {
                debug!("Hash '{}' has {} fields", key, fields.len());
                Ok(fields)
            }
            Err(e) => {
                error!("Failed to read hash '{}': {}", key, e);
                Err(InfrastructureError::Store(e))
            }
        }
    }

    /// Set a hash field only if it does not exist (`HSETNX`)
    ///
    /// This is the conditional-write primitive that makes first-write atomic:
    /// under concurrent callers, exactly one observes `true`.
    ///
    /// # Arguments
    /// * `key` - Hash key
    /// * `field` - Field name
    /// * `value` - Value to set
    ///
    /// # Returns
    /// * `Result<bool, InfrastructureError>` - True if the field was created
    pub async fn hash_set_if_absent(
        &self,
        key: &str,
        field: &str,
        value: &str,
    ) -> Result<bool, InfrastructureError> {
        debug!("Conditionally setting field '{}' of hash '{}'", field, key);

        let result = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();
                let field = field.to_string();
                let value = value.to_string();

                Box::pin(async move {
                    conn.hset_nx::<_, _, _, bool>(key, field, value).await
                })
            })
            .await;

        match result {
            Ok(created) => {
                debug!(
                    "Field '{}' of hash '{}' {}",
                    field,
                    key,
                    if created { "created" } else { "already present" }
                );
                Ok(created)
            }
            Err(e) => {
                error!(
                    "Failed to conditionally set field '{}' of hash '{}': {}",
                    field, key, e
                );
                Err(InfrastructureError::Store(e))
            }
        }
    }

    /// Set multiple fields of a hash (`HSET`)
    ///
    /// # Arguments
    /// * `key` - Hash key
    /// * `fields` - Field name/value pairs to set
    pub async fn hash_set_fields(
        &self,
        key: &str,
        fields: &[(String, String)],
    ) -> Result<(), InfrastructureError> {
        debug!("Setting {} fields of hash '{}'", fields.len(), key);

        let result = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();
                let fields = fields.to_vec();

                Box::pin(async move {
                    conn.hset_multiple::<_, _, _, ()>(key, &fields).await
                })
            })
            .await;

        match result {
            Ok(()) => {
                debug!("Successfully set fields of hash '{}'", key);
                Ok(())
            }
            Err(e) => {
                error!("Failed to set fields of hash '{}': {}", key, e);
                Err(InfrastructureError::Store(e))
            }
        }
    }

    /// Check if a key exists
    ///
    /// # Arguments
    /// * `key` - Key to check
    ///
    /// # Returns
    /// * `Result<bool, InfrastructureError>` - True if the key exists
    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Checking if key '{}' exists", key);

        let result = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();

                Box::pin(async move {
                    conn.exists::<_, bool>(key).await
                })
            })
            .await;

        match result {
            Ok(exists) => Ok(exists),
            Err(e) => {
                error!("Failed to check key '{}' existence: {}", key, e);
                Err(InfrastructureError::Store(e))
            }
        }
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    ///
    /// # Returns
    /// * `Result<bool, InfrastructureError>` - True if healthy, error otherwise
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let result = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move {
                    redis::cmd("PING").query_async::<_, String>(&mut conn).await
                })
            })
            .await;

        match result {
            Ok(response) if response == "PONG" => {
                debug!("Redis health check passed");
                Ok(true)
            }
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Store(e))
            }
        }
    }

    /// Execute a Redis operation with automatic retry logic
    ///
    /// Retries transient errors with exponential backoff using the configured
    /// retry parameters.
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(
            MultiplexedConnection,
        ) -> std::pin::Pin<
            Box<dyn std::future::Future<Output = RedisResult<T>> + Send>,
        >,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            match operation(conn).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Redis operation failed after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }
}

/// Check if a Redis error is transient and worth retrying
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask sensitive parts of a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
