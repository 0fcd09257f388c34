//! Split error types
//!
//! The chunker itself never fails; these errors come from parsing the
//! textual timestamps and durations that feed it.

use thiserror::Error;

/// Errors that can occur while preparing a split request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// Duration text could not be parsed
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// Timestamp text could not be parsed
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Value does not fit in a millisecond i64
    #[error("Value out of range: {0}")]
    Overflow(String),
}

/// Result type for split operations
pub type SplitResult<T> = Result<T, SplitError>;
