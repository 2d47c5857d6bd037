//! kizuna-bot - a chat companion bot for Discord
//!
//! Layers follow the usual split: `domain` holds entities and seam traits,
//! `application` holds routing, pattern matching and ranking, and
//! `infrastructure` holds config, provider clients and platform adapters.

pub mod domain;
pub mod application;
pub mod infrastructure;
