//! Configuration validation
//!
//! The validation is organized into several submodules:
//! - `trait_def`: Core Validate trait definition
//! - `connection_validators`: client, cluster and collection validators
//! - `stream_validators`: stream wrapper validators
//! - `tests`: Test suite for all validators

mod connection_validators;
mod stream_validators;
mod trait_def;

pub use trait_def::Validate;
