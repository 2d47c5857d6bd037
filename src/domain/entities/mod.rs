//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod message;
pub mod command;
pub mod capability;

pub use user::User;
pub use message::{IncomingMessage, HistoryEntry, Reply};
pub use command::{Command, CommandKind, CommandRegistry, CommandSpec};
pub use capability::{CapabilityResult, Language, RankEntry};
