//! Unit tests for the Redis verification record repository

use sv_core::domain::entities::VerificationRecord;
use sv_core::repositories::VerificationCodeRepository;

use crate::config::StoreConfig;
use crate::store::verification_store::{
    format_record_key, RedisVerificationCodeRepository, FIELD_CREATED_AT,
    FIELD_UPDATED_AT, FIELD_VERIFICATION_CODE,
};

#[test]
fn test_format_record_key() {
    assert_eq!(
        format_record_key(None, "+18005551234"),
        "static_code:+18005551234"
    );
    assert_eq!(
        format_record_key(Some("test"), "+18005551234"),
        "test:static_code:+18005551234"
    );
}

#[test]
fn test_mask_phone() {
    assert_eq!(
        RedisVerificationCodeRepository::mask_phone("+18005551234"),
        "***1234"
    );
    assert_eq!(RedisVerificationCodeRepository::mask_phone("1234"), "****");
    assert_eq!(RedisVerificationCodeRepository::mask_phone(""), "****");
}

#[test]
fn test_field_names_match_table_schema() {
    assert_eq!(FIELD_VERIFICATION_CODE, "verification_code");
    assert_eq!(FIELD_CREATED_AT, "created_at");
    assert_eq!(FIELD_UPDATED_AT, "updated_at");
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_insert_and_find_round_trip() {
    let config = StoreConfig::from_env().with_prefix(format!(
        "test:{}",
        chrono::Utc::now().timestamp_micros()
    ));
    let repo = RedisVerificationCodeRepository::connect(&config).await.unwrap();

    let phone = "+18005551234";
    assert!(repo.find_by_phone(phone).await.unwrap().is_none());
    assert!(!repo.exists(phone).await.unwrap());

    let record = VerificationRecord::new(phone, "123456");
    assert!(repo.insert_if_absent(&record).await.unwrap());

    let found = repo.find_by_phone(phone).await.unwrap().unwrap();
    assert_eq!(found.code, "123456");
    assert_eq!(found.created_at, record.created_at);
    assert_eq!(found.updated_at, record.updated_at);
    assert!(repo.exists(phone).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_insert_if_absent_never_overwrites() {
    let config = StoreConfig::from_env().with_prefix(format!(
        "test:{}",
        chrono::Utc::now().timestamp_micros()
    ));
    let repo = RedisVerificationCodeRepository::connect(&config).await.unwrap();

    let phone = "+18005551234";
    let first = VerificationRecord::new(phone, "123456");
    let second = VerificationRecord::new(phone, "654321");

    assert!(repo.insert_if_absent(&first).await.unwrap());
    assert!(!repo.insert_if_absent(&second).await.unwrap());

    let found = repo.find_by_phone(phone).await.unwrap().unwrap();
    assert_eq!(found.code, "123456");
}
