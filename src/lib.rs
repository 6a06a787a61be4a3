//! Pulse Agent - Host Metrics Agent
//!
//! A Rust-based agent for the server monitoring API, providing:
//! - Local filesystem sample collection
//! - Disk usage aggregation and validation
//! - Server metrics payloads with an optional disk usage summary
//! - REST API and Prometheus metrics

pub mod config;
pub mod models;
pub mod resources;
pub mod api;
pub mod metrics;

// Re-export commonly used types
pub use config::Settings;
pub use models::{AgentError, AgentResult, DiskMetrics, DiskUsageAggregate, ServerMetrics};
pub use resources::{aggregate, should_include, validate, DiskMonitor};

/// Version of the pulse-agent
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
