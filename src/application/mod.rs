//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Errors: bot, provider and config errors
//! - Messaging: parsing, pattern matching and routing
//! - Services: command table and channel ranking

pub mod errors;
pub mod services;
pub mod messaging;
