//! Vote lock tracking.
//!
//! Remembers which users voted recently so a bot can gate perks on a vote
//! without asking the directory every time. Entries are pruned by a coarse
//! periodic sweep rather than per-entry timers, so an entry may outlive its
//! lock duration by up to one sweep interval.

#![warn(missing_docs)]

mod config;
mod store;

pub use config::{VoteLockConfig, VoteLockConfigBuilder};
pub use store::{MIN_SWEEP_INTERVAL, VoteLockStore};
