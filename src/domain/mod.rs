//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (IncomingMessage, Command, CapabilityResult)
//! - Traits: Abstractions for infrastructure (ChatGateway, Capabilities, RandomSource)

pub mod entities;
pub mod traits;
