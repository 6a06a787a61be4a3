//! Disk resource module for the Pulse Agent
//!
//! Collects filesystem samples from the local machine, summarizes them into
//! a disk usage aggregate and checks aggregates received from elsewhere.

pub mod aggregate;
pub mod disk;
pub mod filter;
pub mod monitor;
pub mod validate;

pub use aggregate::{aggregate, aggregate_at, CRITICAL_USAGE_PERCENT};
pub use filter::should_include;
pub use monitor::*;
pub use validate::validate;
