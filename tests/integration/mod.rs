//! Integration tests that run without a server

pub mod config_tests;
pub mod stream_tests;
