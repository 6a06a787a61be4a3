//! API module for the Pulse Agent
//!
//! Provides the REST (Actix-Web) API.

mod rest;
mod health;
mod responses;

pub use rest::*;
pub use health::*;
pub use responses::*;
