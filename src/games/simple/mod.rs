//! Simple in-memory player for exercising the engine.
//!
//! A minimal [`GameContext`](crate::core::GameContext) host:
//! - A fixed clock, level, tutorial flag and account creation time
//! - A history counter table and a set of claimed quests
//! - Auras, cooldowns and buildings as plain lists
//!
//! Reads of player history and claimed quests are counted, so tests can
//! observe short-circuiting and caching.

mod player;

pub use player::{SimplePlayer, SimplePlayerBuilder};
