//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the REPL.
//!
//! # Tasks
//! - Reaper: removes stale cache entries once per TTL period

mod reaper;

pub use reaper::spawn_reaper;
