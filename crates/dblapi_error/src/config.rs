//! Configuration error types.

/// Configuration error with source location.
///
/// Raised at construction time for settings that can never work: a missing
/// token, a webhook port without a shared secret, a posting delay under the
/// directory's minimum, and similar.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use dblapi_error::ConfigError;
    ///
    /// let err = ConfigError::new("Missing required parameter: token");
    /// assert!(err.message.contains("token"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
