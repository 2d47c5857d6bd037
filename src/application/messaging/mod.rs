//! Message handling - classification, pattern replies and routing

pub mod parser;
pub mod patterns;
pub mod router;

pub use parser::{Intent, MessageParser};
pub use patterns::{PatternEngine, Resolution};
pub use router::Router;
