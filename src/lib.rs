// ABOUTME: Library root for shipyard - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod certs;
pub mod config;
pub mod deploy;
pub mod error;
pub mod output;
pub mod platform;
pub mod types;
