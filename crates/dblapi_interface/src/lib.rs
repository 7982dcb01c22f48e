//! Trait definitions for the dblapi SDK.
//!
//! The SDK never inspects the host's chat library. Everything it needs from
//! it goes through [`PlatformClient`], and everything it tells the host goes
//! through [`Listeners`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod listeners;
mod traits;

pub use listeners::{ListenerError, ListenerResult, Listeners};
pub use traits::{PlatformClient, StatsSink, VoterProfiles, WebhookHandle};
