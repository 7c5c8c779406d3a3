//! Unit tests for the mock verification code repository

use crate::domain::entities::VerificationRecord;
use crate::errors::DomainError;
use crate::repositories::verification_code::mock::MockVerificationCodeRepository;
use crate::repositories::VerificationCodeRepository;

#[tokio::test]
async fn test_find_by_phone_returns_none_when_empty() {
    let repo = MockVerificationCodeRepository::new(false);

    let result = repo.find_by_phone("+18005551234").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_insert_if_absent_creates_record() {
    let repo = MockVerificationCodeRepository::new(false);
    let record = VerificationRecord::new("+18005551234", "123456");

    let created = repo.insert_if_absent(&record).await.unwrap();
    assert!(created);

    let found = repo.find_by_phone("+18005551234").await.unwrap();
    assert_eq!(found, Some(record));
}

#[tokio::test]
async fn test_insert_if_absent_does_not_overwrite() {
    let repo = MockVerificationCodeRepository::new(false);
    let first = VerificationRecord::new("+18005551234", "123456");
    let second = VerificationRecord::new("+18005551234", "654321");

    assert!(repo.insert_if_absent(&first).await.unwrap());
    assert!(!repo.insert_if_absent(&second).await.unwrap());

    // The first record survives untouched
    let found = repo.find_by_phone("+18005551234").await.unwrap().unwrap();
    assert_eq!(found.code, "123456");
    assert_eq!(repo.record_count(), 1);
}

#[tokio::test]
async fn test_exists_default_method() {
    let repo = MockVerificationCodeRepository::new(false);

    assert!(!repo.exists("+18005551234").await.unwrap());

    let record = VerificationRecord::new("+18005551234", "123456");
    repo.insert_if_absent(&record).await.unwrap();

    assert!(repo.exists("+18005551234").await.unwrap());
}

#[tokio::test]
async fn test_failing_repository_returns_store_error() {
    let repo = MockVerificationCodeRepository::new(true);
    let record = VerificationRecord::new("+18005551234", "123456");

    let find_err = repo.find_by_phone("+18005551234").await.unwrap_err();
    assert!(matches!(find_err, DomainError::Store { .. }));

    let insert_err = repo.insert_if_absent(&record).await.unwrap_err();
    assert!(matches!(insert_err, DomainError::Store { .. }));
}
