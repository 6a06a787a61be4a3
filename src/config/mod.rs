//! Configuration module for the Pulse Agent
//!
//! Supports loading configuration from TOML files and environment variables.

mod settings;

pub use settings::*;
