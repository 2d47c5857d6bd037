//! Application services - command table and channel ranking

pub mod command_service;
pub mod ranking;

pub use command_service::CommandService;
pub use ranking::RankingService;
