//! REST client for the bot-listing directory.
//!
//! [`DirectoryClient`] signs every request with the directory token, maps
//! HTTP status codes onto [`DirectoryErrorKind`](dblapi_error::DirectoryErrorKind)
//! and decodes the JSON body. [`widget_url`] builds listing widget links
//! without touching the network, and [`DiscordWebhook`] posts embeds to a
//! chat webhook for hosts that do not bring their own chat library.
//!
//! # Example
//!
//! ```rust,no_run
//! use dblapi_client::{DirectoryClient, DirectoryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DirectoryClient::new(DirectoryConfig::new("my-token")?)?;
//!     let bot = client.get_bot("264811613708746752").await?;
//!     println!("{} has {} votes", bot.username, bot.points);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod discord_webhook;
mod widget;

pub use client::DirectoryClient;
pub use config::{DEFAULT_BASE_URL, DirectoryConfig};
pub use discord_webhook::{DISCORD_API_URL, DiscordWebhook, parse_webhook_url};
pub use widget::widget_url;
