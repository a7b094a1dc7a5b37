//! Error types for the Inkline foundation crate.

use std::fmt;

/// The main error type for Inkline core operations.
#[derive(Debug)]
pub enum CoreError {
    /// Timer-related error.
    Timer(TimerError),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timer(err) => write!(f, "Timer error: {err}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Timer(err) => Some(err),
        }
    }
}

/// Timer-specific errors.
#[derive(Debug)]
pub enum TimerError {
    /// The timer ID is invalid or has already been removed.
    InvalidTimerId,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimerId => write!(f, "Invalid or expired timer ID"),
        }
    }
}

impl std::error::Error for TimerError {}

impl From<TimerError> for CoreError {
    fn from(err: TimerError) -> Self {
        Self::Timer(err)
    }
}

/// A specialized Result type for Inkline core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
