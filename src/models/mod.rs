//! Data models for the Pulse Agent
//!
//! Disk samples, the disk usage summary and the server metrics payload
//! they travel in.

mod disk;
mod payload;
mod error;

pub use disk::*;
pub use payload::*;
pub use error::*;
