//! End-to-end tests against a live Redis server
//!
//! All tests are `#[ignore]` and skip unless `REDIS_URL` is set.

pub mod client_tests;
pub mod stream_tests;
