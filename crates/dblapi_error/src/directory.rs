//! Errors returned by the bot-listing directory API.

use derive_getters::Getters;

/// Directory request failure variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum DirectoryErrorKind {
    /// HTTP 401, the directory token is wrong.
    #[display("Unauthorized, invalid directory token")]
    Unauthorized,

    /// HTTP 403.
    #[display("Forbidden: {_0}")]
    Forbidden(String),

    /// HTTP 404, usually an unknown id.
    #[display("Not found: {_0}")]
    NotFound(String),

    /// HTTP 400.
    #[display("Bad request: {_0}")]
    BadRequest(String),

    /// Any other non-success status.
    #[display("Request failed with status {_0}")]
    RequestFailed(u16),

    /// Success status but no body.
    #[display("Empty response body with status {_0}")]
    EmptyResponse(u16),

    /// Network-level failure.
    #[display("Transport error: {_0}")]
    Transport(String),

    /// Response body was not the expected JSON.
    #[display("Failed to deserialize response: {_0}")]
    Deserialization(String),

    /// A required id argument was empty.
    #[display("Missing id: {_0}")]
    MissingId(String),
}

/// Directory error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Directory Error: {} at line {} in {}", kind, line, file)]
pub struct DirectoryError {
    kind: DirectoryErrorKind,
    line: u32,
    file: &'static str,
}

impl DirectoryError {
    /// Create a new DirectoryError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use dblapi_error::{DirectoryError, DirectoryErrorKind};
    ///
    /// let err = DirectoryError::new(DirectoryErrorKind::Unauthorized);
    /// assert_eq!(err.kind(), &DirectoryErrorKind::Unauthorized);
    /// ```
    #[track_caller]
    pub fn new(kind: DirectoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Map an HTTP status to the matching error, `None` for success codes.
    #[track_caller]
    pub fn from_status(status: u16, path: &str) -> Option<Self> {
        let kind = match status {
            200..=299 => return None,
            401 => DirectoryErrorKind::Unauthorized,
            403 => DirectoryErrorKind::Forbidden(path.to_string()),
            404 => DirectoryErrorKind::NotFound(path.to_string()),
            400 => DirectoryErrorKind::BadRequest(path.to_string()),
            other => DirectoryErrorKind::RequestFailed(other),
        };
        Some(Self::new(kind))
    }
}
