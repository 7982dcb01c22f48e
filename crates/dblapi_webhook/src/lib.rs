//! Vote webhook ingestion.
//!
//! The directory calls a small HTTP endpoint whenever someone votes. This
//! crate owns that endpoint:
//!
//! - [`VoteReceiver`] checks the shared secret, notifies vote listeners,
//!   records the vote lock and hands the vote to the embed dispatcher.
//! - [`create_router`] mounts the receiver on an axum router.
//! - [`WebhookServer`] binds and owns the listener for one SDK instance.
//! - [`VoteEmbedDispatcher`] renders the vote as a chat embed and posts it
//!   through an outgoing webhook.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dispatcher;
mod embed;
mod receiver;
mod router;
mod server;

pub use dispatcher::VoteEmbedDispatcher;
pub use embed::{
    DEFAULT_VOTE_TITLE, VoteEmbedConfig, VoteEmbedConfigBuilder, build_embed, parse_color,
};
pub use receiver::{VoteOutcome, VoteReceiver};
pub use router::{DEFAULT_VOTE_PATH, create_router, normalize_path};
pub use server::WebhookServer;
