//! Core data types for the dblapi SDK.
//!
//! These mirror the JSON documents exchanged with the bot-listing directory
//! (users, bots, stats, vote checks), the inbound vote notification payload,
//! and the embed posted to an outgoing chat webhook.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bot;
mod embed;
mod stats;
mod user;
mod vote;
mod widget;

pub use bot::{Bot, BotsPage, BotsQuery, BotsQueryBuilder, Voter};
pub use embed::{Embed, EmbedAuthor, EmbedField, EmbedThumbnail, FieldTemplate};
pub use stats::{BotStats, StatsPost};
pub use user::{DEFAULT_AVATAR_URL, Social, User};
pub use vote::{Vote, VoteCheck, VoteType};
pub use widget::{WidgetOptions, WidgetOptionsBuilder};
