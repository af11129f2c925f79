//! Core library components.
//!
//! Vault resolution, the secret record model, secret generation and the
//! operations that drive the external encryption engine.

pub mod config;
pub mod constants;
pub mod engine;
pub mod generate;
pub mod paths;
pub mod record;
pub mod registry;
pub mod resolve;
pub mod source;
pub mod vault;
