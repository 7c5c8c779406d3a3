//! Store module for the Redis-backed verification code table.
//!
//! One Redis hash per phone number holds the pinned verification code and
//! its creation timestamps. First-write atomicity comes from `HSETNX` on the
//! code field.

pub mod redis_client;
pub mod verification_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use verification_store::RedisVerificationCodeRepository;
