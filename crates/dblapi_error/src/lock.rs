//! Vote lock errors.

use derive_getters::Getters;

/// Vote lock failure variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum VoteLockErrorKind {
    /// Lock tracking was not enabled when the API was built.
    #[display("Vote lock tracking is disabled")]
    Disabled,
}

/// Vote lock error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Vote Lock Error: {} at line {} in {}", kind, line, file)]
pub struct VoteLockError {
    kind: VoteLockErrorKind,
    line: u32,
    file: &'static str,
}

impl VoteLockError {
    /// Create a new VoteLockError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: VoteLockErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
