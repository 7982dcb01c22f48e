//! Webhook listener and outgoing dispatch errors.

use derive_getters::Getters;

/// Webhook failure variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum WebhookErrorKind {
    /// Outgoing webhook URL does not end in `{id}/{token}`.
    #[display("Invalid webhook url: {_0}")]
    InvalidUrl(String),

    /// Sending an embed through the outgoing webhook failed.
    #[display("Webhook dispatch failed: {_0}")]
    Dispatch(String),

    /// The vote listener could not bind its port.
    #[display("Failed to bind webhook listener: {_0}")]
    Bind(String),

    /// The vote listener stopped with an error.
    #[display("Webhook listener error: {_0}")]
    Serve(String),
}

/// Webhook error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Webhook Error: {} at line {} in {}", kind, line, file)]
pub struct WebhookError {
    kind: WebhookErrorKind,
    line: u32,
    file: &'static str,
}

impl WebhookError {
    /// Create a new WebhookError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: WebhookErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
