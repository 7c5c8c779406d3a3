mod redis_client_tests;
mod verification_store_tests;
