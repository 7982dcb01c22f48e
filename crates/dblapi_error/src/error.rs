//! Top-level error wrapper types.

use crate::{
    ConfigError, DirectoryError, DirectoryErrorKind, PlatformError, VoteLockError, WebhookError,
};

/// Every error kind produced by the SDK.
///
/// # Examples
///
/// ```
/// use dblapi_error::{ConfigError, DblError};
///
/// let err: DblError = ConfigError::new("No auth provided with port").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum DblErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Directory API error
    #[from(DirectoryError)]
    Directory(DirectoryError),
    /// Vote lock error
    #[from(VoteLockError)]
    VoteLock(VoteLockError),
    /// Webhook listener or dispatch error
    #[from(WebhookError)]
    Webhook(WebhookError),
    /// Host platform client error
    #[from(PlatformError)]
    Platform(PlatformError),
}

/// SDK error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("dblapi Error: {}", _0)]
pub struct DblError(Box<DblErrorKind>);

impl DblError {
    /// Create a new error from a kind.
    pub fn new(kind: DblErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DblErrorKind {
        &self.0
    }

    /// True when the directory rejected the token (HTTP 401).
    ///
    /// ```
    /// use dblapi_error::{DblError, DirectoryError, DirectoryErrorKind};
    ///
    /// let err: DblError = DirectoryError::new(DirectoryErrorKind::Unauthorized).into();
    /// assert!(err.is_unauthorized());
    /// ```
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.kind(),
            DblErrorKind::Directory(e) if *e.kind() == DirectoryErrorKind::Unauthorized
        )
    }

    /// The directory error kind, if this is a directory failure.
    pub fn directory_kind(&self) -> Option<&DirectoryErrorKind> {
        match self.kind() {
            DblErrorKind::Directory(e) => Some(e.kind()),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to DblErrorKind
impl<T> From<T> for DblError
where
    T: Into<DblErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for SDK operations.
pub type DblResult<T> = std::result::Result<T, DblError>;
