//! HTTP server for the pet-hospital owner registry.
//!
//! Exposes the router, configuration, and logging setup so integration tests
//! can drive the server in-process.

pub mod api;
pub mod config;
pub mod logging;
