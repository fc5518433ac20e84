//! Test suite for redis-kit
//!
//! ## Test Categories
//!
//! ### 1. Common Utilities (`common/`)
//! Shared helpers: skip/assert macros, unique key prefixes, live client setup.
//!
//! ### 2. Integration Tests (`integration/`)
//! Public API tests that need no server: configuration loading, URI parsing,
//! and the stream consumer over the in-memory backend.
//!
//! ### 3. End-to-End Tests (`e2e/`)
//! Tests against a real Redis server:
//! - Run with: `REDIS_URL=redis://127.0.0.1:6379/15 cargo test -- --ignored`
//! - Skipped when `REDIS_URL` is not set
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all fast tests (default)
//! cargo test
//!
//! # Run only unit tests
//! cargo test --lib
//!
//! # Run integration tests
//! cargo test --test lib
//!
//! # Run E2E tests (requires a server)
//! REDIS_URL=redis://127.0.0.1:6379/15 cargo test -- --ignored
//! ```

pub mod common;
pub mod e2e;
pub mod integration;
