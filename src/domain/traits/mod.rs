//! Domain traits - Abstractions for infrastructure implementations

pub mod gateway;
pub mod capabilities;
pub mod random;

pub use gateway::{BotInfo, ChatGateway, MAX_HISTORY_PAGE};
pub use capabilities::Capabilities;
pub use random::RandomSource;
