//! Metrics module for the Pulse Agent

mod prometheus;

pub use self::prometheus::*;
