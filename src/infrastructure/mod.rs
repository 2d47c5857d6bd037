//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Api: HTTP clients for the external data providers
//! - Random: thread-local random source
//! - Adapters: Platform integrations (Discord, console)

pub mod config;
pub mod api;
pub mod random;
pub mod adapters;
