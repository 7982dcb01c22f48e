//! Error types for the dblapi SDK.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Every concern is folded into [`DblError`] so callers can use a single
//! [`DblResult`] across the workspace.
//!
//! # Examples
//!
//! ```
//! use dblapi_error::{DblResult, DirectoryError, DirectoryErrorKind};
//!
//! fn fetch_user() -> DblResult<String> {
//!     Err(DirectoryError::new(DirectoryErrorKind::NotFound("/users/1".into())))?
//! }
//!
//! let err = fetch_user().unwrap_err();
//! assert!(!err.is_unauthorized());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod directory;
mod error;
mod lock;
mod platform;
mod webhook;

pub use config::ConfigError;
pub use directory::{DirectoryError, DirectoryErrorKind};
pub use error::{DblError, DblErrorKind, DblResult};
pub use lock::{VoteLockError, VoteLockErrorKind};
pub use platform::PlatformError;
pub use webhook::{WebhookError, WebhookErrorKind};
